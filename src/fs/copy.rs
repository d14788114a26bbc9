use log::{debug, warn};

use crate::fs::fd::{DirStream, Fd};
use crate::fs::syscall::{self, execute};
use crate::fs::{FsError, PathError, PathErrorKind};
use crate::path::Path;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

impl Path {
    fn expect_file(&self) -> Result<(), FsError> {
        if self.is_file()? {
            Ok(())
        } else {
            Err(PathError::new(self.clone(), PathErrorKind::NotAFile).into())
        }
    }

    fn expect_dir(&self) -> Result<(), FsError> {
        if self.is_dir()? {
            Ok(())
        } else {
            Err(PathError::new(self.clone(), PathErrorKind::NotADirectory).into())
        }
    }

    fn expect_not_dir(&self) -> Result<(), FsError> {
        if self.is_dir()? {
            Err(PathError::new(self.clone(), PathErrorKind::DestinationIsDirectory).into())
        } else {
            Ok(())
        }
    }

    /// Copies this file's content to `to`, creating or truncating it. The destination gets the
    /// source's permission bits when it is created.
    ///
    /// Fails before truncating anything if `to` is the source itself, under any name.
    pub fn copy_file(&self, to: &Path) -> Result<Path, FsError> {
        self.expect_file()?;
        to.expect_not_dir()?;

        let source_meta = self.metadata()?;
        if to
            .metadata_if_present(true)?
            .is_some_and(|target_meta| target_meta.is_same_file(&source_meta))
        {
            return Err(PathError::new(to.clone(), PathErrorKind::SameFile).into());
        }

        let source = Fd::open(self, libc::O_RDONLY, 0)?;
        let target = Fd::open(to, libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC, source_meta.permissions)?;

        let mut buf = vec![0_u8; COPY_BUFFER_SIZE];
        loop {
            let count = source.read(&mut buf)?;
            if count == 0 {
                break;
            }
            target.write_all(&buf[..count])?;
        }

        source.close()?;
        target.close()?;
        Ok(to.clone())
    }

    /// Recursively mirrors the entries of this directory into `to`, skipping symbolic links and
    /// entries whose names aren't unicode.
    pub fn copy_content(&self, to: &Path) -> Result<(), FsError> {
        self.expect_dir()?;
        if to.exists()? {
            to.expect_dir()?;
        } else {
            to.mkdir(true)?;
        }

        for entry in DirStream::open(self)?.children()? {
            let Ok(name) = entry.name.to_str() else {
                warn!("skipping entry with non-unicode name {:?} in {self}", entry.name);
                continue;
            };
            let source = self.append([name]);
            let target = to.append([name]);

            let is_link = match entry.file_type {
                Some(file_type) => file_type.is_symlink(),
                None => source.is_link()?,
            };

            if is_link {
                debug!("skipping symbolic link {source}");
            } else if source.is_dir()? {
                source.copy_content(&target)?;
            } else if source.is_file()? {
                source.copy_file(&target)?;
            }
        }
        Ok(())
    }

    /// Renames this file to `to`, which may not be a directory.
    pub fn move_file(&self, to: &Path) -> Result<Path, FsError> {
        self.expect_file()?;
        to.expect_not_dir()?;

        self.rename(to)?;
        Ok(to.clone())
    }

    /// Moves this file or directory into the directory `dir`, keeping its name.
    pub fn move_into(&self, dir: &Path) -> Result<Path, FsError> {
        dir.expect_dir()?;

        let target = dir.append([self.name()]);
        self.rename(&target)?;
        Ok(target)
    }

    fn rename(&self, to: &Path) -> Result<(), FsError> {
        let old_path = syscall::c_path(self)?;
        let new_path = syscall::c_path(to)?;

        execute("rename", &[self, to], || {
            // SAFETY: Both paths are valid nul-terminated strings for the duration of the call.
            unsafe { libc::rename(old_path.as_ptr(), new_path.as_ptr()) }
        })?;
        Ok(())
    }
}
