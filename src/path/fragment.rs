use std::ffi::OsStr;

use derive_more::{From, IsVariant};

use super::{InvalidArgumentError, Path};

/// A single argument to a path combination.
///
/// Fragments nest: a [`Fragment::Sequence`] is combined recursively before it is joined to its
/// neighbours, so `["a", ["b", "c"]]` and `["a", "b", "c"]` produce the same path.
#[derive(Debug, Clone, PartialEq, Eq, From, IsVariant)]
pub enum Fragment<'a> {
    Literal(&'a str),
    Reference(&'a Path),
    Sequence(Vec<Fragment<'a>>),
}

impl<'a> Fragment<'a> {
    pub fn seq<I, F>(fragments: I) -> Fragment<'a>
    where
        I: IntoIterator<Item = F>,
        F: Into<Fragment<'a>>,
    {
        Fragment::Sequence(fragments.into_iter().map(Into::into).collect())
    }
}

impl<'a> From<&'a String> for Fragment<'a> {
    fn from(value: &'a String) -> Self {
        Fragment::Literal(value.as_str())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Fragment<'a> {
    fn from(value: [&'a str; N]) -> Self {
        Fragment::seq(value)
    }
}

impl<'a> TryFrom<&'a OsStr> for Fragment<'a> {
    type Error = InvalidArgumentError;

    fn try_from(value: &'a OsStr) -> Result<Self, Self::Error> {
        value
            .to_str()
            .map(Fragment::Literal)
            .ok_or_else(|| InvalidArgumentError::NonUnicode(value.to_string_lossy().into_owned()))
    }
}

impl<'a> TryFrom<&'a std::path::Path> for Fragment<'a> {
    type Error = InvalidArgumentError;

    fn try_from(value: &'a std::path::Path) -> Result<Self, Self::Error> {
        Fragment::try_from(value.as_os_str())
    }
}

/// Builds a `Vec<Fragment>` from heterogeneous arguments.
///
/// ```
/// use posix_fs::fragments;
/// use posix_fs::path::Path;
///
/// let base = Path::from("/srv");
/// let path = Path::combine(fragments![&base, "www", fragments!["site", "index.html"]]);
/// assert_eq!(path.as_str(), "/srv/www/site/index.html");
/// ```
#[macro_export]
macro_rules! fragments {
    () => {
        ::std::vec::Vec::<$crate::path::Fragment>::new()
    };
    ($($fragment:expr),+ $(,)?) => {
        ::std::vec![$($crate::path::Fragment::from($fragment)),+]
    };
}
