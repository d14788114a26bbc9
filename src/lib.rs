//! POSIX path manipulation and thin, strongly typed filesystem operations.
//!
//! # Paths
//! The [`path`] module is pure string algebra: [`Path`](path::Path) values are combined from
//! [`Fragment`](path::Fragment)s, normalized, resolved and taken apart without ever touching the
//! filesystem. Separators are collapsed on construction, while `.`, `..` and `~` are only dealt
//! with by [`Path::resolve`](path::Path::resolve).
//!
//! ```
//! use posix_fs::path::Path;
//!
//! let conf = Path::combine(["/etc//", "nginx", "../hosts"]);
//! assert_eq!(conf.as_str(), "/etc/nginx/../hosts");
//! assert_eq!(conf.resolve().as_str(), "/etc/hosts");
//! ```
//!
//! # Filesystem
//! The [`fs`] module (Linux only, behind the default `fs` feature) adds methods to `Path` that
//! query and mutate the filesystem through `libc`.
//!
//! # Error Handling
//! Every native call is wrapped by a translator that clears `errno`, makes the call and checks the
//! sentinel return value right away. A failure becomes an [`fs::CallFailure`] holding the call as
//! it was made (`Failed to execute rmdir('/tmp/a'): ...`), the OS message and the error code.
//! Conditions that are checked before any call, such as copying onto a directory, are reported as
//! an [`fs::PathError`]. Both are strongly typed variants of [`fs::FsError`] rather than boxed
//! errors, with their [`Error`](std::error::Error) impls derived by `derive_more`.
//!
//! Queries such as [`Path::is_dir`](path::Path::is_dir) answer `Ok(false)` when the path doesn't
//! exist and only fail for other errors.
//!
//! # Logging
//! Failed native calls are logged at `debug` level and successful ones at `trace` level through
//! the [`log`] facade. Errors that can't be returned, like a failing `close` in a destructor, are
//! logged at `warn` level.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "fs")]
pub mod fs;
pub mod path;
