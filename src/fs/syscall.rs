//! Translation of libc's ambient `errno` into explicit, per-call failures.
//!
//! `errno` is thread-local on Linux, so a clear → call → inspect sequence on one thread can't
//! observe an error set by another. Within a thread, nothing may touch libc between the call and
//! the inspection, which includes logging.

use std::ffi::{CString, c_char};
use std::fmt::{Display, Write};

use libc::{DIR, c_int, dirent, ssize_t};
use log::{debug, trace};

use crate::fs::{CallFailure, FsError};
use crate::path::{InvalidArgumentError, Path};

pub(crate) fn err_no() -> c_int {
    // SAFETY: __errno_location always returns a valid pointer to the calling thread's errno.
    unsafe { *libc::__errno_location() }
}

pub(crate) fn clear_err_no() {
    // SAFETY: As above, the pointer is valid and only ever accessed from this thread.
    unsafe { *libc::__errno_location() = 0 }
}

/// A return value that a primitive uses to signal that it may have failed.
pub(crate) trait Sentinel {
    fn is_sentinel(&self) -> bool;
}

impl Sentinel for c_int {
    fn is_sentinel(&self) -> bool {
        *self == -1
    }
}

impl Sentinel for ssize_t {
    fn is_sentinel(&self) -> bool {
        *self == -1
    }
}

impl Sentinel for *mut DIR {
    fn is_sentinel(&self) -> bool {
        self.is_null()
    }
}

impl Sentinel for *mut dirent {
    fn is_sentinel(&self) -> bool {
        self.is_null()
    }
}

/// Executes a single native call, named `func` and invoked with `args`, returning its value or the
/// error it reported through `errno`.
///
/// A sentinel return with `errno` still clear is passed through, since some primitives (`readdir`
/// at the end of a stream) return their sentinel without failing.
pub(crate) fn execute<T, F>(func: &'static str, args: &[&dyn Display], call: F) -> Result<T, CallFailure>
where
    T: Sentinel,
    F: FnOnce() -> T,
{
    clear_err_no();
    let value = call();
    let code = err_no();

    if code != 0 && value.is_sentinel() {
        let failure = CallFailure::new(context(func, args), code);
        debug!("{failure}");
        return Err(failure);
    }

    trace!("{}", Invocation(func, args));
    Ok(value)
}

/// [`execute`] for the common case of a primitive that takes a single path.
pub(crate) fn execute_on_path<T, F>(func: &'static str, path: &Path, call: F) -> Result<T, FsError>
where
    T: Sentinel,
    F: FnOnce(*const c_char) -> T,
{
    let pathname = c_path(path)?;
    Ok(execute(func, &[path], || call(pathname.as_ptr()))?)
}

pub(crate) fn c_path(path: &Path) -> Result<CString, InvalidArgumentError> {
    CString::new(path.as_str()).map_err(|_| InvalidArgumentError::InteriorNul(path.to_string()))
}

pub(crate) fn context(func: &str, args: &[&dyn Display]) -> String {
    format!("Failed to execute {}", Invocation(func, args))
}

struct Invocation<'a>(&'a str, &'a [&'a dyn Display]);

impl<'a> Display for Invocation<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)?;
        f.write_char('(')?;
        for (i, arg) in self.1.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{arg}'")?;
        }
        f.write_char(')')
    }
}
