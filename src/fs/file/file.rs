use crate::fs::element::path_element;
use crate::fs::fd::Fd;
use crate::fs::ops::FILE_MODE;
use crate::fs::{Dir, FsError, Metadata};
use crate::path::{Fragment, Path};

const READ_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct File {
    pub(crate) path: Path,
}

path_element!(File);

impl File {
    pub fn new<'a, F: Into<Fragment<'a>>>(file_path: F) -> File {
        File {
            path: Path::of(file_path),
        }
    }

    pub fn touch(&self, recursive: bool) -> Result<(), FsError> {
        self.path.touch(recursive)
    }

    pub fn exists(&self) -> Result<bool, FsError> {
        self.path.is_file()
    }

    pub fn size(&self) -> Result<u64, FsError> {
        self.path.filesize()
    }

    pub fn metadata(&self) -> Result<Metadata, FsError> {
        self.path.metadata()
    }

    /// The directory containing this file.
    pub fn parent(&self) -> Dir {
        Dir {
            path: self.path.back(),
        }
    }

    pub fn delete(&self) -> Result<(), FsError> {
        self.path.delete(false)
    }

    pub fn copy_to(&self, to: &Path) -> Result<File, FsError> {
        Ok(File {
            path: self.path.copy_file(to)?,
        })
    }

    /// Moves this file to `to`, returning the file at its new location.
    pub fn move_to(self, to: &Path) -> Result<File, FsError> {
        Ok(File {
            path: self.path.move_file(to)?,
        })
    }

    pub fn read_all(&self) -> Result<Vec<u8>, FsError> {
        let fd = Fd::open(&self.path, libc::O_RDONLY, 0)?;
        let mut content = Vec::new();
        let mut buf = [0_u8; READ_CHUNK_SIZE];

        loop {
            let count = fd.read(&mut buf)?;
            if count == 0 {
                break;
            }
            content.extend_from_slice(&buf[..count]);
        }

        fd.close()?;
        Ok(content)
    }

    /// Replaces the content of this file with `content`, creating it if needed.
    pub fn write_all(&self, content: &[u8]) -> Result<(), FsError> {
        let fd = Fd::open(&self.path, libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC, FILE_MODE)?;
        fd.write_all(content)?;
        fd.close()
    }
}
