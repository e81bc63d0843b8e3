//! Build pipeline logic for the character tables.

mod build;
mod inspect;
mod tables;

pub use build::{BuildSummary, build, build_with};
pub use inspect::{
    BlockCoverage, CandidateCheck, CharCheck, CoverageReport, FontReport, check_text,
    check_text_with, coverage_report, coverage_report_with,
};
pub use tables::{char_support_path, font_groups_path, load_char_table, lookup, verify_outputs};

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Result, bail};
use font_coverage::FontTable;
use fontmap_resolver::PriorityList;
use log::{debug, warn};

use crate::{
    config::DEFAULT_PRIMARY_FONT,
    io::{discover_fonts, load_font_table},
};

pub struct PipelineContext {
    pub font_table: FontTable,
    pub priority: PriorityList,
    pub resources_dir: PathBuf,
    /// Run every step but leave the table files untouched.
    pub dry_run: bool,
}

impl PipelineContext {
    pub fn new(font_table: FontTable, priority: PriorityList, resources_dir: PathBuf) -> Self {
        Self { font_table, priority, resources_dir, dry_run: false }
    }

    /// Assemble the font table from a JSON table and/or a fonts directory.
    ///
    /// With neither, fonts are discovered in `resources_dir`. An empty
    /// `priority` falls back to [`DEFAULT_PRIMARY_FONT`].
    pub fn from_sources(
        font_table: Option<&Path>,
        fonts_dir: Option<&Path>,
        priority: Vec<String>,
        resources_dir: PathBuf,
    ) -> Result<Self> {
        let mut table = FontTable::new();
        if let Some(dir) = fonts_dir {
            table.extend(discover_fonts(dir)?);
        }
        if let Some(path) = font_table {
            table.extend(load_font_table(path)?);
        }
        if font_table.is_none() && fonts_dir.is_none() {
            if !resources_dir.is_dir() {
                bail!("Resources directory not found: {}", resources_dir.display());
            }
            table = discover_fonts(&resources_dir)?;
        }
        if table.is_empty() {
            warn!("No fonts found; every character will be unsupported");
        }
        debug!("Font table has {} entries", table.len());

        let priority = if priority.is_empty() {
            PriorityList::new([DEFAULT_PRIMARY_FONT])
        } else {
            PriorityList::new(priority)
        };
        Ok(Self::new(table, priority, resources_dir))
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn char_support_path(&self) -> PathBuf {
        char_support_path(&self.resources_dir)
    }

    pub fn font_groups_path(&self) -> PathBuf {
        font_groups_path(&self.resources_dir)
    }
}

pub fn run_step<T>(
    name: &str,
    step_num: usize,
    total: usize,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    println!("\n[{step_num}/{total}] {name}");
    let start = Instant::now();
    let value = f()?;
    println!("  ✓ {name} ({:.2}s)", start.elapsed().as_secs_f64());
    Ok(value)
}
