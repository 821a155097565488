//! Expression functions.
//!
//! Functions are published through an explicit [`FunctionRegistry`] instead
//! of being discovered at runtime. Each [`FunctionDefinition`] carries its
//! name, description, typed parameters and a plain function pointer; the
//! expression engine binds them by name and passes the live execution first.

mod artifacts;
mod definition;
mod registry;

pub use artifacts::{
    ArtifactFunctionProvider, RESOLVED_ARTIFACTS, TRIGGER_RESOLVED_ARTIFACT,
    TRIGGER_RESOLVED_ARTIFACT_BY_TYPE,
};
pub use definition::{
    FunctionCallable, FunctionDefinition, FunctionParameter, FunctionValue, ParameterType,
};
pub use registry::{is_valid_namespace, qualified_name, FunctionRegistry};

/// A component that publishes a group of expression functions.
pub trait ExpressionFunctionProvider {
    /// Prefix for the provider's function names, if any.
    fn namespace(&self) -> Option<String>;

    /// The functions this provider publishes.
    fn functions(&self) -> Vec<FunctionDefinition>;
}
