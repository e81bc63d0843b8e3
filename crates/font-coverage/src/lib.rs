//! # Font Coverage
//!
//! Compute which printable characters each font can render, grouped by
//! Unicode block.
//!
//! A font table maps logical names to files. Collection files (`.ttc`/`.otc`)
//! expand into one [`FontIdentity`] per face, each named from the face's own
//! metadata, so a single file can contribute several selectable fonts.
//!
//! ## Example
//!
//! ```no_run
//! use font_coverage::{FontFileSource, FontTable, scan_fonts};
//!
//! let mut table = FontTable::new();
//! table.insert("Noto Sans", "fonts/NotoSans-Regular.ttf");
//! let outcome = scan_fonts(&FontFileSource::new(), &table);
//! for font in &outcome.fonts {
//!     println!("{}: {} characters", font.name(), font.coverage.len());
//! }
//! ```

mod coverage;
mod error;
mod identity;
mod scan;
mod source;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use coverage::{Coverage, ScannedFont};
pub use error::{Error, Result};
pub use identity::{FontIdentity, FontTable};
pub use scan::{ScanOutcome, SkippedFont, expand_identities, scan_fonts};
pub use source::{
    CoverageSource, FileDescription, FileKind, FontFileSource, face_coverage, face_name, file_kind,
};
