//! Reading the persisted tables back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fontmap_char_table::{CharTable, FontGroups, verify};

use crate::{
    config::{CHAR_SUPPORT_FILENAME, FONT_GROUPS_FILENAME},
    io::read_text,
};

pub fn char_support_path(resources_dir: &Path) -> PathBuf {
    resources_dir.join(CHAR_SUPPORT_FILENAME)
}

pub fn font_groups_path(resources_dir: &Path) -> PathBuf {
    resources_dir.join(FONT_GROUPS_FILENAME)
}

/// Load and validate the character table.
pub fn load_char_table(resources_dir: &Path) -> Result<CharTable> {
    let path = char_support_path(resources_dir);
    CharTable::from_json(&read_text(&path)?)
        .with_context(|| format!("Invalid character table: {}", path.display()))
}

/// Check that both persisted tables are valid and describe the same mapping.
pub fn verify_outputs(resources_dir: &Path) -> Result<CharTable> {
    let table = load_char_table(resources_dir)?;

    let path = font_groups_path(resources_dir);
    let groups = FontGroups::from_json(&read_text(&path)?)
        .with_context(|| format!("Invalid font-grouped table: {}", path.display()))?;

    verify(&table, &groups).with_context(|| {
        format!("{CHAR_SUPPORT_FILENAME} and {FONT_GROUPS_FILENAME} disagree")
    })?;
    Ok(table)
}

/// Font for each character of `text`, from the persisted character table.
pub fn lookup(resources_dir: &Path, text: &str) -> Result<Vec<(char, Option<String>)>> {
    let table = load_char_table(resources_dir)?;
    Ok(text.chars().map(|c| (c, table.font_for(c).map(String::from))).collect())
}
