use std::iter::FusedIterator;

use super::{Path, RootForm};

/// The non-empty segments of a path string, skipping runs of '/'.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    pub(crate) path: &'a str,
    pub(crate) head: usize,
    pub(crate) tail: usize,
}

impl<'a> Segments<'a> {
    pub(crate) const fn new(path: &'a str) -> Segments<'a> {
        Segments {
            path,
            head: 0,
            tail: path.len(),
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.path.as_bytes();

        while self.head < self.tail && bytes[self.head] == b'/' {
            self.head += 1;
        }
        if self.head >= self.tail {
            None?
        }

        let start = self.head;
        while self.head < self.tail && bytes[self.head] != b'/' {
            self.head += 1;
        }

        Some(&self.path[start..self.head])
    }
}

impl<'a> DoubleEndedIterator for Segments<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let bytes = self.path.as_bytes();

        while self.tail > self.head && bytes[self.tail - 1] == b'/' {
            self.tail -= 1;
        }
        if self.tail <= self.head {
            None?
        }

        let end = self.tail;
        while self.tail > self.head && bytes[self.tail - 1] != b'/' {
            self.tail -= 1;
        }

        Some(&self.path[self.tail..end])
    }
}

impl<'a> FusedIterator for Segments<'a> {}

/// Successive prefixes of a path, each ending at a segment boundary.
///
/// For `/a/b` this yields `/a` then `/a/b`; the bare root is never yielded.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    pub(crate) path: &'a str,
    pub(crate) index: usize,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(path: &'a str) -> Ancestors<'a> {
        Ancestors {
            path,
            index: RootForm::of(path).as_str().len(),
        }
    }
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = Path;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.path.as_bytes();

        while let Some(ch) = bytes.get(self.index) && *ch == b'/' {
            self.index += 1;
        }
        if self.index >= bytes.len() {
            None?
        }

        while let Some(ch) = bytes.get(self.index) && *ch != b'/' {
            self.index += 1;
        }

        Some(Path::from_normalized(self.path[..self.index].to_owned()))
    }
}

impl<'a> FusedIterator for Ancestors<'a> {}
