//! Unicode codepoint classification.
//!
//! Every codepoint in `0..=MAX_CODEPOINT` gets a general category, a
//! printability flag and a block name. The Unicode data version is the one
//! shipped by the `unicode-general-category` and `unicode-blocks` crates.
//!
//! # Example
//!
//! ```
//! use fontmap_unicode::{block, classify, is_printable};
//!
//! let info = classify('A' as u32).unwrap();
//! assert!(info.printable);
//! assert_eq!(info.category_tag(), "Lu");
//! assert_eq!(block('A'), "Basic Latin");
//! assert!(!is_printable(0x09));
//! ```

mod error;

use std::collections::BTreeMap;

pub use error::{Result, UnicodeError};
pub use unicode_general_category::GeneralCategory;
use unicode_general_category::get_general_category;

/// Highest valid Unicode codepoint.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// Block name reported for codepoints that fall outside every named block.
pub const NO_BLOCK: &str = "No_Block";

/// Category tags that make a codepoint unprintable: control, private use,
/// surrogate and unassigned.
pub const UNPRINTABLE: &[&str] = &["Cc", "Co", "Cs", "Cn"];

/// Surrogate blocks. These are not `char`s, so the block tables never see them.
const SURROGATE_BLOCKS: &[(u32, u32, &str)] = &[
    (0xD800, 0xDB7F, "High Surrogates"),
    (0xDB80, 0xDBFF, "High Private Use Surrogates"),
    (0xDC00, 0xDFFF, "Low Surrogates"),
];

/// Derived properties of a single codepoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub codepoint: u32,
    pub category: GeneralCategory,
    pub printable: bool,
    pub block: &'static str,
}

impl Classification {
    /// Two-letter general category tag (e.g. `Lu`, `Cc`).
    pub fn category_tag(&self) -> &'static str {
        category_tag(self.category)
    }

    /// The codepoint as a `char`, if it is a Unicode scalar value.
    pub fn as_char(&self) -> Option<char> {
        char::from_u32(self.codepoint)
    }
}

/// Classify a codepoint.
///
/// Fails only for values beyond [`MAX_CODEPOINT`].
pub fn classify(codepoint: u32) -> Result<Classification> {
    if codepoint > MAX_CODEPOINT {
        return Err(UnicodeError::OutOfRange(codepoint));
    }

    let category = match char::from_u32(codepoint) {
        Some(c) => get_general_category(c),
        None => GeneralCategory::Surrogate,
    };

    Ok(Classification {
        codepoint,
        category,
        printable: !is_unprintable_category(category),
        block: block_of(codepoint)?,
    })
}

/// Whether a codepoint is printable.
///
/// Codepoints that cannot be classified are treated as unprintable.
pub fn is_printable(codepoint: u32) -> bool {
    classify(codepoint).is_ok_and(|info| info.printable)
}

/// Block name of a character, or [`NO_BLOCK`].
pub fn block(c: char) -> &'static str {
    unicode_blocks::find_unicode_block(c).map(|b| b.name()).unwrap_or(NO_BLOCK)
}

/// Block name of any codepoint, surrogates included.
pub fn block_of(codepoint: u32) -> Result<&'static str> {
    if codepoint > MAX_CODEPOINT {
        return Err(UnicodeError::OutOfRange(codepoint));
    }
    if let Some(c) = char::from_u32(codepoint) {
        return Ok(block(c));
    }
    Ok(SURROGATE_BLOCKS
        .iter()
        .find(|(start, end, _)| (*start..=*end).contains(&codepoint))
        .map(|(_, _, name)| *name)
        .unwrap_or(NO_BLOCK))
}

fn is_unprintable_category(category: GeneralCategory) -> bool {
    UNPRINTABLE.contains(&category_tag(category))
}

/// Two-letter UCD abbreviation of a general category.
pub fn category_tag(category: GeneralCategory) -> &'static str {
    use GeneralCategory::*;

    match category {
        UppercaseLetter => "Lu",
        LowercaseLetter => "Ll",
        TitlecaseLetter => "Lt",
        ModifierLetter => "Lm",
        OtherLetter => "Lo",
        NonspacingMark => "Mn",
        SpacingMark => "Mc",
        EnclosingMark => "Me",
        DecimalNumber => "Nd",
        LetterNumber => "Nl",
        OtherNumber => "No",
        ConnectorPunctuation => "Pc",
        DashPunctuation => "Pd",
        OpenPunctuation => "Ps",
        ClosePunctuation => "Pe",
        InitialPunctuation => "Pi",
        FinalPunctuation => "Pf",
        OtherPunctuation => "Po",
        MathSymbol => "Sm",
        CurrencySymbol => "Sc",
        ModifierSymbol => "Sk",
        OtherSymbol => "So",
        SpaceSeparator => "Zs",
        LineSeparator => "Zl",
        ParagraphSeparator => "Zp",
        Control => "Cc",
        Format => "Cf",
        Surrogate => "Cs",
        PrivateUse => "Co",
        Unassigned => "Cn",
        _ => "Cn",
    }
}

/// Ascending iterator over every printable codepoint.
///
/// Cloning the iterator (or calling [`characters`] again) restarts the walk.
#[derive(Debug, Clone)]
pub struct Characters {
    next: u32,
}

impl Iterator for Characters {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        while self.next <= MAX_CODEPOINT {
            let codepoint = self.next;
            self.next += 1;
            if is_printable(codepoint) {
                return char::from_u32(codepoint);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some((MAX_CODEPOINT + 1).saturating_sub(self.next) as usize))
    }
}

/// Every printable character, in ascending codepoint order.
pub fn characters() -> Characters {
    Characters { next: 0 }
}

/// Every printable character grouped by block name.
pub fn blocks() -> BTreeMap<&'static str, Vec<char>> {
    let mut blocks: BTreeMap<&'static str, Vec<char>> = BTreeMap::new();
    for c in characters() {
        blocks.entry(block(c)).or_default().push(c);
    }
    blocks
}
