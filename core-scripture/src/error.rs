use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptureError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid input: {field} - {message}")]
    InvalidInput { field: String, message: String },
}

pub type Result<T> = std::result::Result<T, ScriptureError>;
