use std::ffi::{CStr, CString};
use std::fmt::{self, Debug, Formatter};
use std::mem;
use std::ptr::NonNull;

use libc::{DIR, c_int, mode_t};
use log::warn;

use crate::fs::syscall::{self, execute, execute_on_path};
use crate::fs::{CallFailure, FileType, FsError};
use crate::path::{InvalidArgumentError, Path};

/// An owned file descriptor, closed on drop.
pub(crate) struct Fd(pub c_int);

impl Fd {
    pub fn open(file_path: &Path, flags: c_int, mode: mode_t) -> Result<Fd, FsError> {
        execute_on_path("open", file_path, |pathname| {
            // SAFETY: pathname is a valid nul-terminated string for the duration of the call.
            unsafe { libc::open(pathname, flags | libc::O_CLOEXEC, mode) }
        })
        .map(Fd)
    }

    pub fn read(&self, buf: &mut [u8]) -> Result<usize, FsError> {
        let count = execute("read", &[self], || {
            // SAFETY: buf is valid for writes of buf.len() bytes.
            unsafe { libc::read(self.0, buf.as_mut_ptr().cast(), buf.len()) }
        })?;
        Ok(count.unsigned_abs())
    }

    pub fn write_all(&self, mut buf: &[u8]) -> Result<(), FsError> {
        while !buf.is_empty() {
            let count = execute("write", &[self], || {
                // SAFETY: buf is valid for reads of buf.len() bytes.
                unsafe { libc::write(self.0, buf.as_ptr().cast(), buf.len()) }
            })?;
            buf = &buf[count.unsigned_abs()..];
        }
        Ok(())
    }

    pub fn close(self) -> Result<(), FsError> {
        let fd = self.0;
        // close invalidates the descriptor regardless of the outcome, so Drop mustn't see it again.
        mem::forget(self);

        execute("close", &[&fd], || {
            // SAFETY: fd is owned and no longer reachable through self.
            unsafe { libc::close(fd) }
        })?;
        Ok(())
    }
}

impl Drop for Fd {
    fn drop(&mut self) {
        let fd = self.0;
        if let Err(failure) = execute("close", &[&fd], || {
            // SAFETY: We are dropping self, so the descriptor is never used again.
            unsafe { libc::close(fd) }
        }) {
            warn!("error while dropping file descriptor: {failure}");
        }
    }
}

impl fmt::Display for Fd {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for Fd {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fd({})", self.0)
    }
}

/// A directory entry as `readdir` reports it, before its name is checked for unicode.
#[derive(Debug, Clone)]
pub(crate) struct RawEntry {
    pub name: CString,
    /// `None` when the filesystem doesn't report entry types.
    pub file_type: Option<FileType>,
}

impl RawEntry {
    pub fn is_special(&self) -> bool {
        matches!(self.name.as_bytes(), b"." | b"..")
    }

    pub fn into_name(self) -> Result<String, InvalidArgumentError> {
        self.name
            .into_string()
            .map_err(|e| InvalidArgumentError::NonUnicode(e.into_cstring().to_string_lossy().into_owned()))
    }
}

/// An open directory stream, yielding entry names.
pub(crate) struct DirStream {
    dir: NonNull<DIR>,
    label: String,
    done: bool,
}

impl DirStream {
    pub fn open(dir_path: &Path) -> Result<DirStream, FsError> {
        DirStream::open_raw(&syscall::c_path(dir_path)?)
    }

    /// Opens a directory by its raw path, which doesn't have to be unicode.
    pub fn open_raw(pathname: &CStr) -> Result<DirStream, FsError> {
        let label = pathname.to_string_lossy().into_owned();
        let dir = execute("opendir", &[&label], || {
            // SAFETY: pathname is a valid nul-terminated string for the duration of the call.
            unsafe { libc::opendir(pathname.as_ptr()) }
        })?;

        // opendir doesn't return null without setting errno, but a null stream must never be read.
        let dir = NonNull::new(dir)
            .ok_or_else(|| CallFailure::new(syscall::context("opendir", &[&label]), libc::EBADF))?;

        Ok(DirStream {
            dir,
            label,
            done: false,
        })
    }

    pub fn next_entry(&mut self) -> Result<Option<RawEntry>, FsError> {
        if self.done {
            return Ok(None);
        }

        let entry = execute("readdir", &[&self.label], || {
            // SAFETY: dir is a live stream owned by self.
            unsafe { libc::readdir(self.dir.as_ptr()) }
        });

        let entry = match entry {
            Ok(entry) => entry,
            Err(failure) => {
                self.done = true;
                Err(failure)?
            },
        };

        // SAFETY: A non-null entry points into the stream's buffer, which stays valid until the
        // next readdir or closedir on this stream, both of which need &mut self.
        let Some(entry) = (unsafe { entry.as_ref() }) else {
            self.done = true;
            return Ok(None);
        };
        // SAFETY: d_name is nul-terminated by readdir.
        let name = unsafe { CStr::from_ptr(entry.d_name.as_ptr()) };

        Ok(Some(RawEntry {
            name: name.to_owned(),
            file_type: FileType::from_dirent_type(entry.d_type),
        }))
    }

    /// Every entry except `.` and `..`, closing the stream.
    pub fn children(mut self) -> Result<Vec<RawEntry>, FsError> {
        let mut children = Vec::new();
        while let Some(entry) = self.next_entry()? {
            if !entry.is_special() {
                children.push(entry);
            }
        }
        Ok(children)
    }
}

impl Iterator for DirStream {
    type Item = Result<String, FsError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_entry() {
            Ok(Some(entry)) => Some(entry.into_name().map_err(FsError::from)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl Drop for DirStream {
    fn drop(&mut self) {
        let dir = self.dir.as_ptr();
        if let Err(failure) = execute("closedir", &[&self.label], || {
            // SAFETY: The stream is owned by self and never used after this.
            unsafe { libc::closedir(dir) }
        }) {
            warn!("error while closing directory stream: {failure}");
        }
    }
}

impl Debug for DirStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DirStream({})", self.label)
    }
}
