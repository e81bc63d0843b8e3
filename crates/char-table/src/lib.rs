//! # Character table
//!
//! The persisted result of font resolution, in two interchangeable JSON
//! encodings:
//!
//! - [`CharTable`]: `{"fonts": [...], "characters": {"A": 0, ...}}`, the
//!   canonical form read by the text layout engine;
//! - [`FontGroups`]: `{"Font Name": "ABC...", ...}`.
//!
//! Both must describe the same assignment; [`verify`] checks it.
//!
//! ```
//! use fontmap_char_table::{CharTable, FontGroups, verify};
//!
//! let table = CharTable::from_resolved([('A', "Noto Sans"), ('あ', "Noto Sans CJK")]);
//! let groups = FontGroups::encode(&table);
//! verify(&table, &groups).unwrap();
//! assert_eq!(table.font_for('あ'), Some("Noto Sans CJK"));
//! ```

mod error;
mod groups;
mod table;

pub use error::{Error, Result};
pub use groups::{FontGroups, verify};
pub use table::CharTable;
