use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to hash a password or parse a stored hash.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Failure to sign a JSON web token.
    #[error("Failed to encode token: {0}")]
    TokenEncode(#[source] jsonwebtoken::errors::Error),

    /// A stored enum column holds a value outside the known set.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse {kind} from stored value '{value}'")]
    ParseEnum {
        /// Name of the enum being parsed
        kind: &'static str,
        /// The stored value that failed to parse
        value: String,
    },
}
