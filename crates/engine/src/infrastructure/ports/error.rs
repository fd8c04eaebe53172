//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stored value was rejected (schema cast, geospatial key, required field).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// An identifier could not be cast to the store's id type.
    #[error("Cast to id failed for value \"{0}\"")]
    InvalidId(String),
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a ConstraintViolation error.
    pub fn constraint(message: impl ToString) -> Self {
        Self::ConstraintViolation(message.to_string())
    }

    pub fn invalid_id(value: impl ToString) -> Self {
        Self::InvalidId(value.to_string())
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Error name as the document store reports it to clients.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "DocumentNotFoundError",
            Self::Database { .. } => "MongoServerError",
            Self::Serialization(_) => "SerializationError",
            Self::ConstraintViolation(_) => "ValidationError",
            Self::InvalidId(_) => "CastError",
        }
    }
}
