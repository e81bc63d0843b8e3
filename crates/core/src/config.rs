//! Configuration constants for character table builds.

/// Canonical table, `{"fonts": [...], "characters": {...}}`.
pub const CHAR_SUPPORT_FILENAME: &str = "char-support.json";

/// Font-grouped table, `{"Font": "ABC..."}`.
pub const FONT_GROUPS_FILENAME: &str = "char-support-by-font.json";

/// Font preferred for every character it covers when no priority list is given.
pub const DEFAULT_PRIMARY_FONT: &str = "NotoSans-Regular";

/// Directory holding the font files and the generated tables.
pub const DEFAULT_RESOURCES_DIR: &str = "resources/fonts";

/// Patterns used to discover fonts in a directory.
pub const FONT_PATTERNS: &[&str] = &["**/*.ttf", "**/*.otf", "**/*.ttc", "**/*.otc"];
