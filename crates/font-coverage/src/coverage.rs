//! Per-block character coverage of a font.

use std::collections::{BTreeMap, BTreeSet};

use fontmap_unicode::{block, is_printable};

use crate::FontIdentity;

/// Characters a font can render, grouped by Unicode block.
///
/// Only printable characters are ever recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    blocks: BTreeMap<&'static str, BTreeSet<char>>,
}

impl Coverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a character. Unprintable characters are ignored.
    pub fn insert(&mut self, c: char) -> bool {
        if !is_printable(c as u32) {
            return false;
        }
        self.blocks.entry(block(c)).or_default().insert(c)
    }

    pub fn contains(&self, c: char) -> bool {
        self.blocks.get(block(c)).is_some_and(|chars| chars.contains(&c))
    }

    /// Number of covered characters in `block`.
    pub fn block_size(&self, block: &str) -> usize {
        self.blocks.get(block).map_or(0, BTreeSet::len)
    }

    pub fn block_sizes(&self) -> BTreeMap<&'static str, usize> {
        self.blocks.iter().map(|(block, chars)| (*block, chars.len())).collect()
    }

    pub fn blocks(&self) -> impl Iterator<Item = (&'static str, &BTreeSet<char>)> {
        self.blocks.iter().map(|(block, chars)| (*block, chars))
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.blocks.values().flatten().copied()
    }

    /// Total number of covered characters.
    pub fn len(&self) -> usize {
        self.blocks.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl FromIterator<char> for Coverage {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut coverage = Self::new();
        for c in iter {
            coverage.insert(c);
        }
        coverage
    }
}

impl Extend<char> for Coverage {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for c in iter {
            self.insert(c);
        }
    }
}

/// A font identity together with its computed coverage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFont {
    pub identity: FontIdentity,
    pub coverage: Coverage,
}

impl ScannedFont {
    pub fn new(identity: FontIdentity, coverage: Coverage) -> Self {
        Self { identity, coverage }
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_by_block() {
        let coverage: Coverage = ['A', 'B', 'Ω', 'α'].into_iter().collect();
        assert_eq!(coverage.block_size("Basic Latin"), 2);
        assert_eq!(coverage.block_size("Greek and Coptic"), 2);
        assert_eq!(coverage.block_size("Cyrillic"), 0);
        assert_eq!(coverage.len(), 4);
    }

    #[test]
    fn test_unprintable_ignored() {
        let coverage: Coverage = ['\t', '\u{E000}', 'x'].into_iter().collect();
        assert_eq!(coverage.len(), 1);
        assert!(!coverage.contains('\t'));
        assert!(coverage.contains('x'));
    }

    #[test]
    fn test_duplicates_counted_once() {
        let mut coverage = Coverage::new();
        assert!(coverage.insert('a'));
        assert!(!coverage.insert('a'));
        assert_eq!(coverage.block_sizes().get("Basic Latin"), Some(&1));
    }
}
