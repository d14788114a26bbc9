use std::fmt::{self, Display, Formatter};

use super::{Path, SEPARATOR};

pub struct DisplayPath<'a> {
    pub(crate) inner: &'a Path,
}

pub struct DisplayHome<'a> {
    pub(crate) inner: &'a Path,
    pub(crate) home: Option<Path>,
}

impl<'a> DisplayPath<'a> {
    /// Renders paths under the home directory as `~/...`.
    pub fn shrink_home(&self) -> DisplayHome<'a> {
        DisplayHome {
            inner: self.inner,
            home: Path::home_path(),
        }
    }

    pub fn shrink_home_from(&self, home: Path) -> DisplayHome<'a> {
        DisplayHome {
            inner: self.inner,
            home: Some(home),
        }
    }
}

impl<'a> Display for DisplayPath<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.as_str())
    }
}

impl<'a> Display for DisplayHome<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let path = self.inner.as_str();

        if let Some(home) = &self.home
            && !home.is_empty()
            && let Some(rest) = path.strip_prefix(home.as_str())
            && (rest.is_empty() || rest.starts_with(SEPARATOR))
        {
            write!(f, "~{}", rest)
        } else {
            write!(f, "{}", path)
        }
    }
}
