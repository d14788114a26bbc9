use std::fmt::{self, Display, Formatter};

use log::{debug, warn};
use uuid::Uuid;

use crate::fs::{AsPath, FsError, PathError, PathErrorKind, UnlinkOutcome};
use crate::path::Path;

const TEMP_PREFIX: &str = "_ok_fs_";
const TEMP_SUFFIX: &str = ".tmp";

/// A file that is removed when this value is dropped.
///
/// The file doesn't have to exist for the whole lifetime of the value. Removal on drop is best
/// effort: a file that is already gone is fine, any other failure is logged and otherwise ignored.
#[derive(Debug)]
pub struct TempFile {
    path: Path,
    unlinked: bool,
}

impl TempFile {
    /// Takes ownership of the file at `file_path`, which must be a regular file if it exists.
    pub fn new(file_path: Path) -> Result<TempFile, FsError> {
        if file_path.is_dir()? {
            return Err(PathError::new(file_path, PathErrorKind::OccupiedByDirectory).into());
        }
        if file_path.exists()? && !file_path.is_file()? {
            return Err(PathError::new(file_path, PathErrorKind::NotAFile).into());
        }

        Ok(TempFile {
            path: file_path,
            unlinked: false,
        })
    }

    /// A temporary file with a generated name inside `dir`, created right away if `touch`.
    pub fn create_in(dir: &Path, touch: bool) -> Result<TempFile, FsError> {
        let temp = TempFile::new(dir.append([unique_name().as_str()]))?;
        if touch {
            temp.touch()?;
        }
        Ok(temp)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> Result<bool, FsError> {
        self.path.is_file()
    }

    pub fn touch(&self) -> Result<(), FsError> {
        self.path.touch(false)
    }

    /// Removes the file now instead of on drop.
    pub fn delete(mut self) -> Result<(), FsError> {
        self.unlinked = true;
        match self.path.try_unlink() {
            UnlinkOutcome::Removed | UnlinkOutcome::NotFound => Ok(()),
            UnlinkOutcome::Failed(e) => Err(e),
        }
    }
}

/// 64 random hex digits between the prefix and suffix.
fn unique_name() -> String {
    format!(
        "{TEMP_PREFIX}{}{}{TEMP_SUFFIX}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

impl AsPath for TempFile {
    fn path(&self) -> &Path {
        &self.path
    }
}

impl Display for TempFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.unlinked {
            return;
        }

        match self.path.try_unlink() {
            UnlinkOutcome::Removed => debug!("removed temporary file {}", self.path),
            UnlinkOutcome::NotFound => (),
            UnlinkOutcome::Failed(e) => warn!("error while removing temporary file: {e}"),
        }
    }
}
