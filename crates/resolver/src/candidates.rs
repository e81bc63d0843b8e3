//! Inverting per-font coverage into per-character candidate lists.

use std::collections::{BTreeMap, HashMap, btree_map, hash_map};

use font_coverage::ScannedFont;
use log::{info, warn};

/// Name and per-block coverage sizes of one aggregated font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSummary {
    pub name: String,
    block_sizes: BTreeMap<&'static str, usize>,
}

impl FontSummary {
    /// Number of characters this font covers in `block`.
    pub fn block_size(&self, block: &str) -> usize {
        self.block_sizes.get(block).copied().unwrap_or(0)
    }

    pub fn block_sizes(&self) -> &BTreeMap<&'static str, usize> {
        &self.block_sizes
    }
}

/// For every covered character, the fonts able to render it.
///
/// Fonts are referred to by ordinal, their position in [`Candidates::fonts`].
/// A candidate list follows scan order and carries no other ordering.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    fonts: Vec<FontSummary>,
    by_name: HashMap<String, usize>,
    by_char: BTreeMap<char, Vec<usize>>,
}

impl Candidates {
    /// Merge scanned fonts into candidate lists.
    ///
    /// Font names are expected to be unique; a repeated name is dropped with a
    /// warning.
    pub fn aggregate(fonts: &[ScannedFont]) -> Self {
        let mut candidates = Self::default();

        for font in fonts {
            let ordinal = candidates.fonts.len();
            match candidates.by_name.entry(font.name().to_string()) {
                hash_map::Entry::Occupied(_) => {
                    warn!("Ignoring duplicate font name {:?}", font.name());
                    continue;
                }
                hash_map::Entry::Vacant(slot) => {
                    slot.insert(ordinal);
                }
            }

            candidates.fonts.push(FontSummary {
                name: font.name().to_string(),
                block_sizes: font.coverage.block_sizes(),
            });

            for c in font.coverage.chars() {
                match candidates.by_char.entry(c) {
                    btree_map::Entry::Vacant(slot) => {
                        slot.insert(vec![ordinal]);
                    }
                    btree_map::Entry::Occupied(mut slot) => slot.get_mut().push(ordinal),
                }
            }
        }

        info!(
            "Aggregated {} fonts covering {} characters",
            candidates.fonts.len(),
            candidates.by_char.len()
        );
        candidates
    }

    /// Number of characters with at least one candidate.
    pub fn len(&self) -> usize {
        self.by_char.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_char.is_empty()
    }

    pub fn fonts(&self) -> &[FontSummary] {
        &self.fonts
    }

    pub fn font(&self, ordinal: usize) -> &FontSummary {
        &self.fonts[ordinal]
    }

    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Names of the fonts covering `c`; empty when none does.
    pub fn candidates(&self, c: char) -> Vec<&str> {
        self.ordinals(c).iter().map(|&i| self.fonts[i].name.as_str()).collect()
    }

    pub fn ordinals(&self, c: char) -> &[usize] {
        self.by_char.get(&c).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Coverage size of `font` in `block`, `0` for unknown fonts.
    pub fn block_coverage(&self, font: &str, block: &str) -> usize {
        self.ordinal(font).map_or(0, |i| self.fonts[i].block_size(block))
    }

    /// Covered characters in ascending order with their candidate ordinals.
    pub fn iter(&self) -> impl Iterator<Item = (char, &[usize])> {
        self.by_char.iter().map(|(c, ordinals)| (*c, ordinals.as_slice()))
    }

    pub(crate) fn by_char(&self) -> &BTreeMap<char, Vec<usize>> {
        &self.by_char
    }
}
