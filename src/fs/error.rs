use std::io;

use derive_more::{Display, Error, From, IsVariant, TryInto};
use libc::c_int;

use crate::path::{InvalidArgumentError, Path};

/// A native call that reported an error through `errno`.
#[derive(Debug, Display, Clone, PartialEq, Eq, Error)]
#[display("{context}: `{message}`")]
pub struct CallFailure {
    context: String,
    message: String,
    code: c_int,
}

impl CallFailure {
    pub(crate) fn new(context: String, code: c_int) -> CallFailure {
        CallFailure {
            context,
            message: io::Error::from_raw_os_error(code).to_string(),
            code,
        }
    }

    /// The call that failed, with its literal arguments.
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The raw `errno` value.
    pub const fn code(&self) -> c_int {
        self.code
    }

    /// Whether the failure means that the target (or one of its parents) doesn't exist.
    pub const fn is_not_found(&self) -> bool {
        matches!(self.code, libc::ENOENT | libc::ENOTDIR)
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum PathErrorKind {
    #[display("is not a directory")]
    NotADirectory,
    #[display("is not a file")]
    NotAFile,
    #[display("parent directory does not exist")]
    MissingParent,
    #[display("destination is a directory")]
    DestinationIsDirectory,
    #[display("source and destination are the same file")]
    SameFile,
    #[display("can not create a temporary file in place of a directory")]
    OccupiedByDirectory,
}

/// A precondition on a path that failed before any native call was made.
#[derive(Debug, Display, Clone, PartialEq, Eq, Error)]
#[display("With '{path}': {kind}")]
pub struct PathError {
    path: Path,
    kind: PathErrorKind,
}

impl PathError {
    pub(crate) const fn new(path: Path, kind: PathErrorKind) -> PathError {
        PathError { path, kind }
    }

    pub const fn path(&self) -> &Path {
        &self.path
    }

    pub const fn kind(&self) -> PathErrorKind {
        self.kind
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq, From, Error, IsVariant, TryInto)]
pub enum FsError {
    InvalidArgument(InvalidArgumentError),
    Call(CallFailure),
    Path(PathError),
}

impl FsError {
    /// The underlying OS error code, if this came from a native call.
    pub const fn code(&self) -> Option<c_int> {
        match self {
            FsError::Call(failure) => Some(failure.code),
            _ => None,
        }
    }
}

/// The outcome of a best-effort [`Path::try_unlink`].
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum UnlinkOutcome {
    Removed,
    /// Nothing was there to remove.
    NotFound,
    Failed(FsError),
}
