//! Type definitions for document paths.

use std::fmt;

/// A step in a document path.
///
/// Rows address their children positionally, so most entries are indices.
/// `Key` entries only appear past the last row, where they name a field of
/// a leaf node (for example a label's `Value`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathEntry {
    /// A concrete position in an ordered child array.
    Index(usize),
    /// One past the last element for inserts, the last element otherwise.
    EndOfArray,
    /// A named field of a node.
    Key(String),
}

impl PathEntry {
    pub fn is_index(&self) -> bool {
        matches!(self, PathEntry::Index(_))
    }

    pub fn is_end_of_array(&self) -> bool {
        matches!(self, PathEntry::EndOfArray)
    }

    /// Whether this entry addresses an array position (index or sentinel).
    pub fn is_positional(&self) -> bool {
        matches!(self, PathEntry::Index(_) | PathEntry::EndOfArray)
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            PathEntry::Index(i) => Some(*i),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            PathEntry::Key(k) => Some(k),
            _ => None,
        }
    }
}

impl From<usize> for PathEntry {
    fn from(i: usize) -> Self {
        PathEntry::Index(i)
    }
}

impl From<&str> for PathEntry {
    fn from(s: &str) -> Self {
        crate::parse_entry(s)
    }
}

impl fmt::Display for PathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathEntry::Index(i) => write!(f, "{i}"),
            PathEntry::EndOfArray => f.write_str("-"),
            PathEntry::Key(k) => f.write_str(&crate::escape_component(k)),
        }
    }
}

/// A path through a document, from the root down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathEntry>);

impl Path {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&PathEntry> {
        self.0.get(i)
    }

    pub fn first(&self) -> Option<&PathEntry> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&PathEntry> {
        self.0.last()
    }

    pub fn push(&mut self, entry: impl Into<PathEntry>) {
        self.0.push(entry.into());
    }

    pub fn pop(&mut self) -> Option<PathEntry> {
        self.0.pop()
    }

    pub fn entries(&self) -> &[PathEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathEntry> {
        self.0.iter()
    }

    /// The first `len` entries of this path. Clamped to the path length.
    pub fn prefix(&self, len: usize) -> Path {
        Path(self.0[..len.min(self.0.len())].to_vec())
    }

    /// Returns a copy of this path with `entry` appended.
    pub fn child(&self, entry: impl Into<PathEntry>) -> Path {
        let mut out = self.clone();
        out.push(entry);
        out
    }
}

impl From<Vec<PathEntry>> for Path {
    fn from(entries: Vec<PathEntry>) -> Self {
        Path(entries)
    }
}

impl FromIterator<PathEntry> for Path {
    fn from_iter<I: IntoIterator<Item = PathEntry>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathEntry;
    type IntoIter = std::slice::Iter<'a, PathEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Path {
    type Output = PathEntry;

    fn index(&self, i: usize) -> &PathEntry {
        &self.0[i]
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.0 {
            write!(f, "/{entry}")?;
        }
        Ok(())
    }
}
