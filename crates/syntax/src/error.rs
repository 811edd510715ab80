use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyntaxError>;

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("Malformed XML in {uri}: {message}")]
    Xml { uri: String, message: String },
}
