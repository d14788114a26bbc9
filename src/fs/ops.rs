use std::ffi::{CStr, CString};
use std::mem::MaybeUninit;
use std::ptr;

use libc::{mode_t, stat as Stat};
use log::debug;

use crate::fs::fd::{DirStream, Fd};
use crate::fs::syscall::{self, execute, execute_on_path};
use crate::fs::{Dir, File, FileType, FsError, Metadata, PathError, PathErrorKind, UnlinkOutcome};
use crate::path::{InvalidArgumentError, Path};

/// The mode new directories are created with, before the umask is applied.
pub const DIR_MODE: mode_t = 0o777;
/// The mode new files are created with, before the umask is applied.
pub const FILE_MODE: mode_t = 0o666;

impl Path {
    /// Creates this directory, and its missing ancestors if `recursive`. Does nothing if the
    /// directory already exists.
    pub fn mkdir(&self, recursive: bool) -> Result<(), FsError> {
        if self.is_dir()? {
            return Ok(());
        }

        if !recursive {
            return self.create_single_dir();
        }

        for ancestor in self.ancestors() {
            if !ancestor.is_dir()? {
                debug!("creating directory {ancestor}");
                ancestor.create_single_dir()?;
            }
        }
        Ok(())
    }

    fn create_single_dir(&self) -> Result<(), FsError> {
        let pathname = syscall::c_path(self)?;
        execute("mkdir", &[self, &format!("{DIR_MODE:o}")], || {
            // SAFETY: pathname is a valid nul-terminated string for the duration of the call.
            unsafe { libc::mkdir(pathname.as_ptr(), DIR_MODE) }
        })?;
        Ok(())
    }

    /// Creates this file if it doesn't exist and updates its timestamps.
    ///
    /// The parent directory is created if `recursive`, otherwise it has to exist already.
    pub fn touch(&self, recursive: bool) -> Result<(), FsError> {
        let parent = self.back();
        if !parent.is_empty() && !parent.is_dir()? {
            if !recursive {
                return Err(PathError::new(parent, PathErrorKind::MissingParent).into());
            }
            parent.mkdir(true)?;
        }

        if !self.exists()? {
            Fd::open(self, libc::O_WRONLY | libc::O_CREAT, FILE_MODE)?.close()?;
        }

        execute_on_path("utimensat", self, |pathname| {
            // SAFETY: pathname is nul-terminated and a null times pointer means "now".
            unsafe { libc::utimensat(libc::AT_FDCWD, pathname, ptr::null(), 0) }
        })?;
        Ok(())
    }

    /// Creates this directory like [`Path::mkdir`] and wraps it.
    pub fn create_dir(&self, recursive: bool) -> Result<Dir, FsError> {
        self.mkdir(recursive)?;
        Ok(Dir::from(self.clone()))
    }

    /// Creates this file like [`Path::touch`] and wraps it.
    pub fn create_file(&self, recursive: bool) -> Result<File, FsError> {
        self.touch(recursive)?;
        Ok(File::from(self.clone()))
    }

    pub fn unlink(&self) -> Result<(), FsError> {
        execute_on_path("unlink", self, |pathname| {
            // SAFETY: pathname is a valid nul-terminated string for the duration of the call.
            unsafe { libc::unlink(pathname) }
        })?;
        Ok(())
    }

    /// Unlinks this path, treating a missing file as a distinct outcome rather than a failure.
    pub fn try_unlink(&self) -> UnlinkOutcome {
        match self.unlink() {
            Ok(()) => UnlinkOutcome::Removed,
            Err(FsError::Call(failure)) if failure.is_not_found() => UnlinkOutcome::NotFound,
            Err(e) => UnlinkOutcome::Failed(e),
        }
    }

    pub fn rmdir(&self) -> Result<(), FsError> {
        execute_on_path("rmdir", self, |pathname| {
            // SAFETY: pathname is a valid nul-terminated string for the duration of the call.
            unsafe { libc::rmdir(pathname) }
        })?;
        Ok(())
    }

    /// Removes whatever is at this path. Directories are emptied first if `recursive`, symbolic
    /// links are removed without touching their target. Does nothing if there is nothing here.
    pub fn delete(&self, recursive: bool) -> Result<(), FsError> {
        if self.is_link()? {
            self.unlink()
        } else if self.is_dir()? {
            if recursive {
                self.clean_directory(false)?;
            }
            self.rmdir()
        } else if self.is_file()? {
            self.unlink()
        } else {
            Ok(())
        }
    }

    /// Removes every entry of this directory, leaving the directory itself in place.
    ///
    /// Symbolic links are unlinked. If `follow_link` is set and a link points to a directory,
    /// that directory is cleaned through the link before the link is removed. Entries whose names
    /// aren't unicode are removed too, recursively and without following links.
    pub fn clean_directory(&self, follow_link: bool) -> Result<(), FsError> {
        if !self.is_dir()? {
            return Ok(());
        }

        for entry in DirStream::open(self)?.children()? {
            match entry.name.to_str() {
                Ok(name) => self.append([name]).clean_child(entry.file_type, follow_link)?,
                Err(_) => {
                    let pathname = join_raw(self.as_str().as_bytes(), &entry.name)?;
                    remove_raw(&pathname, entry.file_type)?;
                },
            }
        }
        Ok(())
    }

    fn clean_child(&self, file_type: Option<FileType>, follow_link: bool) -> Result<(), FsError> {
        let is_link = match file_type {
            Some(file_type) => file_type.is_symlink(),
            None => self.is_link()?,
        };

        if is_link {
            if follow_link && self.is_dir()? {
                debug!("cleaning linked directory {self}");
                self.clean_directory(true)?;
            }
            self.unlink()
        } else {
            self.delete(true)
        }
    }

    pub fn chmod(&self, mode: mode_t) -> Result<(), FsError> {
        let pathname = syscall::c_path(self)?;
        execute("chmod", &[self, &format!("{mode:o}")], || {
            // SAFETY: pathname is a valid nul-terminated string for the duration of the call.
            unsafe { libc::chmod(pathname.as_ptr(), mode) }
        })?;
        Ok(())
    }
}

fn join_raw(parent: &[u8], name: &CStr) -> Result<CString, FsError> {
    let mut bytes = parent.to_vec();
    if bytes.last() != Some(&b'/') {
        bytes.push(b'/');
    }
    bytes.extend_from_slice(name.to_bytes());

    CString::new(bytes).map_err(|e| {
        InvalidArgumentError::InteriorNul(String::from_utf8_lossy(&e.into_vec()).into_owned()).into()
    })
}

/// Removes an entry that can only be named by its raw bytes, emptying it first if it is a
/// directory.
fn remove_raw(pathname: &CStr, file_type: Option<FileType>) -> Result<(), FsError> {
    let label = pathname.to_string_lossy();

    let file_type = match file_type {
        Some(file_type) => file_type,
        None => {
            let mut raw_meta: MaybeUninit<Stat> = MaybeUninit::uninit();
            execute("lstat", &[&label], || {
                // SAFETY: pathname is nul-terminated and raw_meta is valid for a write of one stat.
                unsafe { libc::lstat(pathname.as_ptr(), raw_meta.as_mut_ptr()) }
            })?;
            // SAFETY: lstat either initializes raw_meta or fails, which returned above.
            Metadata::from_stat(unsafe { raw_meta.assume_init() }).file_type
        },
    };

    if file_type.is_directory() {
        for entry in DirStream::open_raw(pathname)?.children()? {
            remove_raw(&join_raw(pathname.to_bytes(), &entry.name)?, entry.file_type)?;
        }
        execute("rmdir", &[&label], || {
            // SAFETY: pathname is a valid nul-terminated string for the duration of the call.
            unsafe { libc::rmdir(pathname.as_ptr()) }
        })?;
    } else {
        execute("unlink", &[&label], || {
            // SAFETY: pathname is a valid nul-terminated string for the duration of the call.
            unsafe { libc::unlink(pathname.as_ptr()) }
        })?;
    }

    debug!("removed entry with non-unicode name {label}");
    Ok(())
}
