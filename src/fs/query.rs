use std::mem::MaybeUninit;

use libc::{c_int, stat as Stat};

use crate::fs::fd::DirStream;
use crate::fs::syscall::execute_on_path;
use crate::fs::{FsError, Metadata};
use crate::path::Path;

/// The order of the names returned by [`Path::scandir`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanOrder {
    #[default]
    Ascending,
    Descending,
    /// Whatever order the filesystem returns.
    Unsorted,
}

const SPECIAL_ENTRIES: [&str; 2] = [".", ".."];

impl Path {
    /// Metadata of the file this path points to, following symbolic links.
    pub fn metadata(&self) -> Result<Metadata, FsError> {
        let mut raw_meta: MaybeUninit<Stat> = MaybeUninit::uninit();
        execute_on_path("stat", self, |pathname| {
            // SAFETY: pathname is nul-terminated and raw_meta is valid for a write of one stat.
            unsafe { libc::stat(pathname, raw_meta.as_mut_ptr()) }
        })?;
        // SAFETY: stat either initializes raw_meta or fails, which returned above.
        let raw = unsafe { raw_meta.assume_init() };

        Ok(Metadata::from_stat(raw))
    }

    /// Metadata of the path itself, without following a final symbolic link.
    pub fn link_metadata(&self) -> Result<Metadata, FsError> {
        let mut raw_meta: MaybeUninit<Stat> = MaybeUninit::uninit();
        execute_on_path("lstat", self, |pathname| {
            // SAFETY: pathname is nul-terminated and raw_meta is valid for a write of one stat.
            unsafe { libc::lstat(pathname, raw_meta.as_mut_ptr()) }
        })?;
        // SAFETY: lstat either initializes raw_meta or fails, which returned above.
        let raw = unsafe { raw_meta.assume_init() };

        Ok(Metadata::from_stat(raw))
    }

    pub(crate) fn metadata_if_present(&self, follow: bool) -> Result<Option<Metadata>, FsError> {
        let meta = if follow {
            self.metadata()
        } else {
            self.link_metadata()
        };

        match meta {
            Ok(meta) => Ok(Some(meta)),
            Err(FsError::Call(failure)) if failure.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn exists(&self) -> Result<bool, FsError> {
        Ok(self.metadata_if_present(true)?.is_some())
    }

    pub fn is_file(&self) -> Result<bool, FsError> {
        Ok(self.metadata_if_present(true)?.is_some_and(|meta| meta.file_type.is_regular()))
    }

    pub fn is_dir(&self) -> Result<bool, FsError> {
        Ok(self.metadata_if_present(true)?.is_some_and(|meta| meta.file_type.is_directory()))
    }

    pub fn is_link(&self) -> Result<bool, FsError> {
        Ok(self.metadata_if_present(false)?.is_some_and(|meta| meta.file_type.is_symlink()))
    }

    pub fn filesize(&self) -> Result<u64, FsError> {
        Ok(self.metadata()?.size)
    }

    fn access(&self, mode: c_int) -> Result<bool, FsError> {
        let allowed = execute_on_path("access", self, |pathname| {
            // SAFETY: pathname is a valid nul-terminated string for the duration of the call.
            unsafe { libc::access(pathname, mode) }
        });

        match allowed {
            Ok(_) => Ok(true),
            Err(FsError::Call(failure))
                if failure.is_not_found()
                    || matches!(failure.code(), libc::EACCES | libc::EROFS | libc::ETXTBSY) =>
            {
                Ok(false)
            },
            Err(e) => Err(e),
        }
    }

    pub fn is_readable(&self) -> Result<bool, FsError> {
        self.access(libc::R_OK)
    }

    pub fn is_writable(&self) -> Result<bool, FsError> {
        self.access(libc::W_OK)
    }

    pub fn is_executable(&self) -> Result<bool, FsError> {
        self.access(libc::X_OK)
    }

    /// Whether this is a directory without entries or a file of zero length.
    pub fn content_is_empty(&self) -> Result<bool, FsError> {
        if self.metadata()?.file_type.is_directory() {
            Ok(self.scandir(true, ScanOrder::Unsorted)?.is_empty())
        } else {
            Ok(self.filesize()? == 0)
        }
    }

    /// The names of the entries of this directory.
    pub fn scandir(&self, exclude_special: bool, order: ScanOrder) -> Result<Vec<String>, FsError> {
        let mut names = Vec::new();

        for name in DirStream::open(self)? {
            let name = name?;
            if exclude_special && SPECIAL_ENTRIES.contains(&name.as_str()) {
                continue;
            }
            names.push(name);
        }

        match order {
            ScanOrder::Ascending => names.sort(),
            ScanOrder::Descending => names.sort_by(|a, b| b.cmp(a)),
            ScanOrder::Unsorted => (),
        }

        Ok(names)
    }
}
