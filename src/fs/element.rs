use crate::path::Path;

/// Anything that is backed by a single [`Path`].
pub trait AsPath {
    fn path(&self) -> &Path;
}

impl AsPath for Path {
    fn path(&self) -> &Path {
        self
    }
}

/// Generates the shared plumbing of a type wrapping a single path.
macro_rules! path_element {
    ($name:ident) => {
        impl $crate::fs::AsPath for $name {
            fn path(&self) -> &$crate::path::Path {
                &self.path
            }
        }

        impl<'a> From<&'a $name> for $crate::path::Fragment<'a> {
            fn from(value: &'a $name) -> Self {
                $crate::path::Fragment::Reference(&value.path)
            }
        }

        impl From<$crate::path::Path> for $name {
            fn from(path: $crate::path::Path) -> Self {
                $name { path }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.path)
            }
        }
    };
}

pub(crate) use path_element;

