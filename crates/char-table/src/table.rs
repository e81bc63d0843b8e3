//! The canonical table: sorted font list plus character to font index.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Character to font lookup table.
///
/// `fonts` is sorted and holds only fonts that some character uses; a
/// font's index is its position in that list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharTable {
    fonts: Vec<String>,
    characters: BTreeMap<char, usize>,
}

impl CharTable {
    /// Build from a resolved character to font name mapping.
    pub fn from_resolved<'a>(mapping: impl IntoIterator<Item = (char, &'a str)>) -> Self {
        let mapping: BTreeMap<char, &str> = mapping.into_iter().collect();
        let fonts: Vec<String> =
            mapping.values().copied().collect::<BTreeSet<_>>().into_iter().map(String::from).collect();
        let indices: BTreeMap<&str, usize> =
            fonts.iter().enumerate().map(|(i, name)| (name.as_str(), i)).collect();
        let characters = mapping.iter().map(|(c, name)| (*c, indices[name])).collect();
        Self { fonts, characters }
    }

    /// Assemble from parts, checking every invariant.
    pub fn new(fonts: Vec<String>, characters: BTreeMap<char, usize>) -> Result<Self> {
        let table = Self { fonts, characters };
        table.validate()?;
        Ok(table)
    }

    /// Check that fonts are sorted and unique, every index is in range and
    /// every font is used by some character.
    pub fn validate(&self) -> Result<()> {
        if let Some(pair) = self.fonts.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(Error::UnsortedFonts(pair[1].clone()));
        }

        let mut used = vec![false; self.fonts.len()];
        for (&c, &index) in &self.characters {
            match used.get_mut(index) {
                Some(slot) => *slot = true,
                None => return Err(Error::IndexOutOfRange { c, index, fonts: self.fonts.len() }),
            }
        }

        match used.iter().position(|used| !used) {
            Some(orphan) => Err(Error::OrphanFont(self.fonts[orphan].clone())),
            None => Ok(()),
        }
    }

    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    pub fn characters(&self) -> &BTreeMap<char, usize> {
        &self.characters
    }

    /// Number of characters in the table.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn font_index(&self, c: char) -> Option<usize> {
        self.characters.get(&c).copied()
    }

    /// Font that renders `c`, if any font covers it.
    pub fn font_for(&self, c: char) -> Option<&str> {
        self.font_index(c).and_then(|i| self.fonts.get(i)).map(String::as_str)
    }

    /// Characters assigned to `font`, in ascending order.
    pub fn characters_of<'a>(&'a self, font: &str) -> impl Iterator<Item = char> + 'a {
        let index = self.fonts.iter().position(|name| name == font);
        self.characters
            .iter()
            .filter(move |(_, i)| Some(**i) == index)
            .map(|(c, _)| *c)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }
}
