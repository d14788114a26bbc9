use std::convert::Infallible;
use std::env;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use super::{Ancestors, DisplayPath, Fragment, RootForm, SEPARATOR, Segments};

/// The environment variable consulted for home directory expansion.
pub const HOME_VAR: &str = "HOME";

const CURRENT: &str = ".";
const PARENT: &str = "..";
const HOME: &str = "~";

/// An immutable POSIX path.
///
/// # Invariants
/// - Runs of '/' are collapsed, except for a leading "//" which is kept as its own root.
/// - The string contains no trailing '/' unless it is exactly a root.
/// - The value never changes after construction, all derived paths are new values.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path {
    pub(crate) inner: String,
}

/// Combines `fragments` into a normalized path string.
///
/// Root detection only applies to the very first fragment, so `combine(["a/", "/b"])` is `a/b`.
pub fn combine<'a, I, F>(fragments: I) -> String
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    let fragments: Vec<Fragment<'a>> = fragments.into_iter().map(Into::into).collect();
    parts_to_string(true, &fragments)
}

/// Combines `fragments` and resolves the result, see [`Path::resolve`].
pub fn realpath<'a, I, F>(fragments: I) -> Path
where
    I: IntoIterator<Item = F>,
    F: Into<Fragment<'a>>,
{
    Path::combine(fragments).resolve()
}

fn parts_to_string(mut keep_root: bool, fragments: &[Fragment<'_>]) -> String {
    let mut result = String::new();

    for fragment in fragments {
        let part = fragment_to_string(fragment, keep_root);
        keep_root = false;

        if part.is_empty() {
            continue;
        }
        if !result.is_empty() && !part.starts_with(SEPARATOR) && !is_exact_root(&result) {
            result.push(SEPARATOR);
        }
        result.push_str(&part);
    }

    result
}

fn fragment_to_string(fragment: &Fragment<'_>, keep_root: bool) -> String {
    let source = match fragment {
        Fragment::Sequence(nested) => return parts_to_string(keep_root, nested),
        Fragment::Reference(path) => path.as_str(),
        Fragment::Literal(literal) => literal,
    };

    let root = if keep_root {
        RootForm::of(source)
    } else {
        RootForm::None
    };

    fix_slashes(source, root)
}

fn fix_slashes(source: &str, root: RootForm) -> String {
    let mut fixed = String::with_capacity(source.len());
    fixed.push_str(root.as_str());

    for (i, segment) in Segments::new(source).enumerate() {
        if i > 0 {
            fixed.push(SEPARATOR);
        }
        fixed.push_str(segment);
    }

    fixed
}

/// Applies a single segment to a partially resolved path, without home expansion.
fn push_segment<'a>(result: &mut Vec<&'a str>, root: RootForm, segment: &'a str) {
    match segment {
        CURRENT => (),
        PARENT => {
            if result.last().is_some_and(|last| *last != PARENT) {
                result.pop();
            } else if !root.is_absolute() {
                result.push(segment);
            }
        },
        _ => result.push(segment),
    }
}

fn is_exact_root(source: &str) -> bool {
    matches!(source, "/" | "//")
}

impl Path {
    /// Combines `fragments` into a new path.
    ///
    /// ```
    /// use posix_fs::path::Path;
    ///
    /// assert_eq!(Path::combine(["//", "a"]).as_str(), "//a");
    /// assert_eq!(Path::combine(["abc////", "de//f"]).as_str(), "abc/de/f");
    /// ```
    pub fn combine<'a, I, F>(fragments: I) -> Path
    where
        I: IntoIterator<Item = F>,
        F: Into<Fragment<'a>>,
    {
        Path::from_normalized(combine(fragments))
    }

    /// Normalizes any path-like value into a path.
    ///
    /// A reference yields a copy of that path, as does a sequence holding a single reference.
    /// Anything else is combined.
    pub fn of<'a, F: Into<Fragment<'a>>>(from: F) -> Path {
        match from.into() {
            Fragment::Reference(path) => path.clone(),
            Fragment::Sequence(nested) => match nested.as_slice() {
                [Fragment::Reference(path)] => (*path).clone(),
                _ => Path::from_normalized(parts_to_string(true, &nested)),
            },
            literal => Path::from_normalized(parts_to_string(true, &[literal])),
        }
    }

    /// Wraps a string that was produced by another path operation, skipping normalization.
    pub(crate) const fn from_normalized(inner: String) -> Path {
        Path { inner }
    }

    pub fn root_path() -> Path {
        Path::from_normalized(String::from("/"))
    }

    /// The current user's home directory, read from `$HOME`.
    pub fn home() -> Option<String> {
        env::var(HOME_VAR).ok().filter(|home| !home.is_empty())
    }

    pub fn home_path() -> Option<Path> {
        Path::home().map(|home| Path::combine([home.as_str()]))
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn into_string(self) -> String {
        self.inner
    }

    /// The raw length of the path string.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn is_relative(&self) -> bool {
        !self.inner.starts_with(SEPARATOR)
    }

    pub fn root_form(&self) -> RootForm {
        RootForm::of(&self.inner)
    }

    /// Returns a new path with `fragments` joined after this one.
    pub fn append<'a, I, F>(&'a self, fragments: I) -> Path
    where
        I: IntoIterator<Item = F>,
        F: Into<Fragment<'a>>,
    {
        let mut all = vec![Fragment::Reference(self)];
        all.extend(fragments.into_iter().map(Into::into));
        Path::from_normalized(parts_to_string(true, &all))
    }

    /// Returns a new path with `fragments` joined before this one. Root detection applies to the
    /// first of `fragments`, not to `self`.
    pub fn prepend<'a, I, F>(&'a self, fragments: I) -> Path
    where
        I: IntoIterator<Item = F>,
        F: Into<Fragment<'a>>,
    {
        let mut all: Vec<Fragment<'a>> = fragments.into_iter().map(Into::into).collect();
        all.push(Fragment::Reference(self));
        Path::from_normalized(parts_to_string(true, &all))
    }

    /// The parent of this path, cut at the last separator.
    ///
    /// ```
    /// use posix_fs::path::Path;
    ///
    /// assert_eq!(Path::from("/a/b").back().as_str(), "/a");
    /// assert_eq!(Path::from("/a").back().as_str(), "/");
    /// assert_eq!(Path::from("//a").back().as_str(), "//");
    /// assert_eq!(Path::from("a").back().as_str(), "");
    /// ```
    pub fn back(&self) -> Path {
        match self.inner.rfind(SEPARATOR) {
            None => Path::default(),
            Some(0) => Path::root_path(),
            Some(1) if self.inner.starts_with(SEPARATOR) => {
                Path::from_normalized(String::from("//"))
            },
            Some(pos) => Path::from_normalized(self.inner[..pos].to_owned()),
        }
    }

    /// Lexically resolves `.`, `..` and a leading `~`, using `$HOME` for the latter.
    ///
    /// A `~` is leading when nothing remains before it once `.` and `..` are applied, so
    /// `./~/a` and `a/../~` expand as well. If `$HOME` isn't set or isn't absolute, `~` is kept as
    /// a literal segment.
    pub fn resolve(&self) -> Path {
        self.resolve_with(Path::home_path().as_ref())
    }

    /// Like [`Path::resolve`], with an explicit home directory.
    pub fn resolve_from_home(&self, home: &Path) -> Path {
        self.resolve_with(Some(home))
    }

    fn resolve_with(&self, home: Option<&Path>) -> Path {
        let mut root = self.root_form();
        let mut result: Vec<&str> = Vec::new();

        for segment in self.segments() {
            match (segment, home) {
                // Only expands when it would lead a relative result, which keeps resolve
                // idempotent. A relative home can't be expanded idempotently and is ignored.
                (HOME, Some(home))
                    if result.is_empty() && !root.is_absolute() && home.root_form().is_absolute() =>
                {
                    root = home.root_form();
                    for home_segment in home.segments() {
                        push_segment(&mut result, root, home_segment);
                    }
                },
                _ => push_segment(&mut result, root, segment),
            }
        }

        let mut resolved = String::from(root.as_str());
        resolved.push_str(&result.join("/"));
        Path::from_normalized(resolved)
    }

    /// The final segment, or the root itself for an exact root.
    pub fn name(&self) -> &str {
        match self.inner.as_str() {
            root if is_exact_root(root) => root,
            _ => self.segments().next_back().unwrap_or(""),
        }
    }

    /// The number of separators between non-empty segments.
    pub fn depth(&self) -> usize {
        self.segments().count().saturating_sub(1)
    }

    pub fn segments(&self) -> Segments<'_> {
        Segments::new(&self.inner)
    }

    /// Successive prefixes of this path, from the shortest to the path itself.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors::new(&self.inner)
    }

    pub const fn display(&self) -> DisplayPath<'_> {
        DisplayPath { inner: self }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Path::combine([value])
    }
}

impl From<String> for Path {
    fn from(value: String) -> Self {
        Path::from(value.as_str())
    }
}

impl From<Path> for String {
    fn from(value: Path) -> Self {
        value.inner
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::from(s))
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl AsRef<std::path::Path> for Path {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.inner)
    }
}
