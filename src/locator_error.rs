use thiserror::Error;

/// Error produced by an async factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum LocatorError {
    /// `get` found no instance for the type.
    #[error("Type not registered: {type_name}")]
    NotRegistered { type_name: &'static str },

    /// `get_async` found neither an instance nor a factory for the type.
    #[error("Type not registered for async resolution: {type_name}")]
    AsyncNotRegistered { type_name: &'static str },

    /// The async factory for the type returned an error.
    #[error("Factory for {type_name} failed: {source}")]
    Factory {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },

    /// A stored value did not downcast to the requested type.
    #[error("Type mismatch in registry for type: {type_name}")]
    TypeMismatch { type_name: &'static str },
}

impl LocatorError {
    /// Name of the type the failed operation was asked for.
    pub fn type_name(&self) -> &'static str {
        match self {
            LocatorError::NotRegistered { type_name }
            | LocatorError::AsyncNotRegistered { type_name }
            | LocatorError::Factory { type_name, .. }
            | LocatorError::TypeMismatch { type_name } => type_name,
        }
    }

    /// True for the two "nothing registered" variants.
    pub fn is_not_registered(&self) -> bool {
        matches!(
            self,
            LocatorError::NotRegistered { .. } | LocatorError::AsyncNotRegistered { .. }
        )
    }
}
