//! Font-grouped encoding: each font name with the characters it renders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CharTable, Error, Result};

/// Font name to the concatenation of every character resolved to it.
///
/// Interchangeable with [`CharTable`]: [`FontGroups::encode`] and
/// [`FontGroups::decode`] are inverse of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontGroups(BTreeMap<String, String>);

impl FontGroups {
    pub fn encode(table: &CharTable) -> Self {
        let mut groups: BTreeMap<String, String> = BTreeMap::new();
        for (&c, &index) in table.characters() {
            if let Some(font) = table.fonts().get(index) {
                groups.entry(font.clone()).or_default().push(c);
            }
        }
        Self(groups)
    }

    /// Rebuild the canonical table: fonts sorted by name, indices from that
    /// order, characters inverted from each font's sequence.
    pub fn decode(&self) -> Result<CharTable> {
        let fonts: Vec<String> = self.0.keys().cloned().collect();
        let mut characters = BTreeMap::new();

        for (index, (font, chars)) in self.0.iter().enumerate() {
            if chars.is_empty() {
                return Err(Error::EmptyFontSequence(font.clone()));
            }
            for c in chars.chars() {
                if characters.insert(c, index).is_some() {
                    return Err(Error::DuplicateCharacter(c));
                }
            }
        }

        CharTable::new(fonts, characters)
    }

    pub fn get(&self, font: &str) -> Option<&str> {
        self.0.get(font).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(font, chars)| (font.as_str(), chars.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<BTreeMap<String, String>> for FontGroups {
    fn from(groups: BTreeMap<String, String>) -> Self {
        Self(groups)
    }
}

/// Check that `groups` decodes to exactly `table`.
pub fn verify(table: &CharTable, groups: &FontGroups) -> Result<()> {
    let decoded = groups.decode()?;
    if decoded == *table {
        return Ok(());
    }
    Err(Error::Inconsistent(describe_difference(table, &decoded)))
}

fn describe_difference(expected: &CharTable, actual: &CharTable) -> String {
    if expected.fonts() != actual.fonts() {
        return format!(
            "font lists differ ({} fonts vs {} decoded)",
            expected.fonts().len(),
            actual.fonts().len()
        );
    }
    let first = expected
        .characters()
        .keys()
        .chain(actual.characters().keys())
        .copied()
        .find(|c| expected.font_for(*c) != actual.font_for(*c));
    match first {
        Some(c) => format!(
            "character {c:?} maps to {:?}, decoded {:?}",
            expected.font_for(c),
            actual.font_for(c)
        ),
        None => "tables differ".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_groups_by_font() {
        let table = CharTable::from_resolved([('a', "F1"), ('b', "F2"), ('c', "F1")]);
        let groups = FontGroups::encode(&table);
        assert_eq!(groups.get("F1"), Some("ac"));
        assert_eq!(groups.get("F2"), Some("b"));
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_decode_sorts_fonts() {
        let groups = FontGroups::from(BTreeMap::from([
            ("Zed".to_string(), "z".to_string()),
            ("Alpha".to_string(), "xy".to_string()),
        ]));
        let table = groups.decode().unwrap();
        assert_eq!(table.fonts(), ["Alpha", "Zed"]);
        assert_eq!(table.font_index('x'), Some(0));
        assert_eq!(table.font_index('z'), Some(1));
    }

    #[test]
    fn test_decode_rejects_shared_character() {
        let groups = FontGroups::from(BTreeMap::from([
            ("A".to_string(), "xy".to_string()),
            ("B".to_string(), "y".to_string()),
        ]));
        assert!(matches!(groups.decode(), Err(Error::DuplicateCharacter('y'))));
    }

    #[test]
    fn test_decode_rejects_empty_sequence() {
        let groups = FontGroups::from(BTreeMap::from([("A".to_string(), String::new())]));
        assert!(matches!(groups.decode(), Err(Error::EmptyFontSequence(name)) if name == "A"));
    }

    #[test]
    fn test_verify_detects_mismatch() {
        let table = CharTable::from_resolved([('a', "F1"), ('b', "F2")]);
        let tampered = FontGroups::from(BTreeMap::from([
            ("F1".to_string(), "b".to_string()),
            ("F2".to_string(), "a".to_string()),
        ]));
        let err = verify(&table, &tampered).unwrap_err();
        assert!(matches!(err, Error::Inconsistent(_)));
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn test_verify_detects_missing_font() {
        let table = CharTable::from_resolved([('a', "F1"), ('b', "F2")]);
        let partial = FontGroups::from(BTreeMap::from([("F1".to_string(), "ab".to_string())]));
        assert!(matches!(verify(&table, &partial), Err(Error::Inconsistent(_))));
    }

    #[test]
    fn test_json_is_font_to_string() {
        let table = CharTable::from_resolved([('a', "F1"), ('Ω', "F1")]);
        let json = FontGroups::encode(&table).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({ "F1": "aΩ" }));
        assert_eq!(FontGroups::from_json(&json).unwrap(), FontGroups::encode(&table));
    }
}
