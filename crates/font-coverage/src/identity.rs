//! Font identities and the font table they are resolved from.

use std::{
    fmt::{self, Display, Formatter},
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single selectable font: one face of one file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontIdentity {
    pub name: String,
    pub path: PathBuf,
    /// Face index inside a collection file; `None` for a plain font file.
    pub face_index: Option<u32>,
}

impl FontIdentity {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), path: path.into(), face_index: None }
    }

    pub fn with_face(name: impl Into<String>, path: impl Into<PathBuf>, face_index: u32) -> Self {
        Self { name: name.into(), path: path.into(), face_index: Some(face_index) }
    }

    /// Face index to open, `0` for plain font files.
    pub fn index(&self) -> u32 {
        self.face_index.unwrap_or(0)
    }
}

impl Display for FontIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.face_index {
            Some(index) => write!(f, "{} ({}#{index})", self.name, self.path.display()),
            None => write!(f, "{} ({})", self.name, self.path.display()),
        }
    }
}

/// Ordered mapping from logical font name to font file path.
///
/// Insertion order is the font load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontTable {
    entries: IndexMap<String, PathBuf>,
}

impl FontTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font. A name that is already present keeps its position and
    /// gets the new path.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> &mut Self {
        self.entries.insert(name.into(), path.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(name, path)| (name.as_str(), path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve relative paths against `base`.
    pub fn rebase(self, base: &Path) -> Self {
        let entries = self
            .entries
            .into_iter()
            .map(|(name, path)| {
                let path = if path.is_relative() { base.join(path) } else { path };
                (name, path)
            })
            .collect();
        Self { entries }
    }

    /// Merge another table into this one; entries from `other` win.
    pub fn extend(&mut self, other: FontTable) {
        self.entries.extend(other.entries);
    }
}

impl<N: Into<String>, P: Into<PathBuf>> FromIterator<(N, P)> for FontTable {
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(n, p)| (n.into(), p.into())).collect() }
    }
}
