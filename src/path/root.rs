use derive_more::{Display, IsVariant};

use super::SEPARATOR;

/// The classification of a path string's prefix.
///
/// POSIX gives exactly two leading slashes an implementation-defined meaning, so `//` is kept as
/// its own root while one, three or more leading slashes all collapse to `/`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum RootForm {
    /// The string is empty.
    #[display("")]
    Empty,
    /// A relative path, no root.
    #[display("")]
    None,
    #[display("/")]
    Single,
    #[display("//")]
    Double,
}

impl RootForm {
    pub fn of(source: &str) -> RootForm {
        match source {
            "" => RootForm::Empty,
            "/" => RootForm::Single,
            "//" => RootForm::Double,
            _ if !source.starts_with(SEPARATOR) => RootForm::None,
            _ => match source.bytes().take_while(|ch| *ch == b'/').count() {
                2 => RootForm::Double,
                _ => RootForm::Single,
            },
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            RootForm::Empty | RootForm::None => "",
            RootForm::Single => "/",
            RootForm::Double => "//",
        }
    }

    pub const fn is_absolute(&self) -> bool {
        matches!(self, RootForm::Single | RootForm::Double)
    }
}
