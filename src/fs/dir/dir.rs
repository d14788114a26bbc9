use crate::fs::element::path_element;
use crate::fs::{File, FsError, ScanOrder};
use crate::path::{Fragment, Path};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Dir {
    pub(crate) path: Path,
}

path_element!(Dir);

impl Dir {
    pub fn new<'a, F: Into<Fragment<'a>>>(dir_path: F) -> Dir {
        Dir {
            path: Path::of(dir_path),
        }
    }

    /// Creates the directory unless it exists, along with its ancestors if `recursive`.
    pub fn create(&self, recursive: bool) -> Result<(), FsError> {
        self.path.mkdir(recursive)
    }

    pub fn exists(&self) -> Result<bool, FsError> {
        self.path.is_dir()
    }

    pub fn dir(&self, name: &str) -> Dir {
        Dir {
            path: self.path.append([name]),
        }
    }

    pub fn file(&self, name: &str) -> File {
        File {
            path: self.path.append([name]),
        }
    }

    /// The paths of this directory's entries, in ascending order of name.
    pub fn entries(&self) -> Result<Vec<Path>, FsError> {
        Ok(self
            .path
            .scandir(true, ScanOrder::Ascending)?
            .iter()
            .map(|name| self.path.append([name.as_str()]))
            .collect())
    }

    pub fn is_empty(&self) -> Result<bool, FsError> {
        self.path.content_is_empty()
    }

    pub fn clean(&self) -> Result<(), FsError> {
        self.path.clean_directory(false)
    }

    pub fn delete(&self) -> Result<(), FsError> {
        self.path.delete(true)
    }

    pub fn copy_content_to(&self, to: &Dir) -> Result<(), FsError> {
        self.path.copy_content(&to.path)
    }
}
