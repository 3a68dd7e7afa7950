use thiserror::Error;

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by this crate.
///
/// Decision functions never fail; these errors only surface while parsing
/// input that crossed a serialization boundary or while validating a
/// substitute role table.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid identifier input.
    #[error("invalid id: {0}")]
    InvalidId(String),
    /// Role name outside the closed role set.
    #[error("unknown role: {0}")]
    UnknownRole(String),
    /// Permission name outside the closed permission set.
    #[error("unknown permission: {0}")]
    UnknownPermission(String),
    /// Resource kind outside the closed resource set.
    #[error("unknown resource kind: {0}")]
    UnknownResourceKind(String),
    /// Role table violates a registry invariant.
    #[error("invalid role registry: {0}")]
    InvalidRegistry(String),
}
