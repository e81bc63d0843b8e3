//! Fontmap Core - build pipeline for the character to font lookup tables.
//!
//! Scans a font table, resolves one font per printable character and writes
//! the result as [`CHAR_SUPPORT_FILENAME`](config::CHAR_SUPPORT_FILENAME) and
//! [`FONT_GROUPS_FILENAME`](config::FONT_GROUPS_FILENAME), after checking
//! that both encodings agree.

pub mod config;
pub mod io;
pub mod pipeline;

pub use font_coverage::{FontIdentity, FontTable, SkippedFont};
pub use fontmap_char_table::CharTable;
pub use fontmap_resolver::PriorityList;
pub use pipeline::{
    BlockCoverage, BuildSummary, CandidateCheck, CharCheck, CoverageReport, FontReport,
    PipelineContext, build, build_with, check_text, check_text_with, coverage_report,
    coverage_report_with, load_char_table, lookup, run_step, verify_outputs,
};
