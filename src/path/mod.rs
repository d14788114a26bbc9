//! Pure path algebra: combination, resolution and decomposition of POSIX path strings.
//!
//! Nothing in this module touches the filesystem. See [`crate::fs`] for the methods that do.

mod display;
mod error;
mod fragment;
mod iter;
mod path;
mod root;

mod proptests;

pub use display::*;
pub use error::*;
pub use fragment::*;
pub use iter::*;
pub use path::*;
pub use root::*;

pub const SEPARATOR: char = '/';
