//! Domain-level error type.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A gender name outside `MAN`, `WOMAN`, `OTHER`.
    #[error("unknown gender: '{0}'")]
    UnknownGender(String),
}
