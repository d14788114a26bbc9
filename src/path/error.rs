use derive_more::{Display, Error, IsVariant};

/// A path argument that can't be represented as a POSIX path string.
#[derive(Debug, Display, Clone, PartialEq, Eq, Error, IsVariant)]
pub enum InvalidArgumentError {
    #[display("invalid path argument '{_0}': expected valid unicode")]
    NonUnicode(#[error(not(source))] String),
    #[display("invalid path argument '{_0}': contains a nul byte")]
    InteriorNul(#[error(not(source))] String),
}
