use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use font_coverage::{CoverageSource, FontFileSource, SkippedFont, scan_fonts};
use fontmap_char_table::{CharTable, FontGroups, verify};
use fontmap_resolver::{Candidates, Resolved, resolve};
use log::info;

use super::{PipelineContext, run_step};
use crate::io::write_all;

/// What a build produced.
#[derive(Debug)]
pub struct BuildSummary {
    /// Number of printable characters in the Unicode database.
    pub printable: usize,
    pub table: CharTable,
    /// Font identities that were scanned successfully.
    pub fonts_scanned: usize,
    pub skipped: Vec<SkippedFont>,
    /// Files written, empty on a dry run.
    pub written: Vec<PathBuf>,
}

impl BuildSummary {
    /// Characters assigned to some font.
    pub fn covered(&self) -> usize {
        self.table.len()
    }

    pub fn selected_fonts(&self) -> usize {
        self.table.fonts().len()
    }

    /// Covered share of all printable characters, in percent.
    pub fn coverage_percent(&self) -> f64 {
        if self.printable == 0 {
            return 0.0;
        }
        self.covered() as f64 * 100.0 / self.printable as f64
    }
}

/// Build both tables from the font files named by the context.
pub fn build(ctx: &PipelineContext) -> Result<BuildSummary> {
    build_with(ctx, &FontFileSource::new())
}

/// Build both tables, reading fonts through `source`.
///
/// Nothing is written unless the font-grouped table decodes back to the
/// character table.
pub fn build_with(ctx: &PipelineContext, source: &impl CoverageSource) -> Result<BuildSummary> {
    let start = Instant::now();
    let total = if ctx.dry_run { 4 } else { 5 };

    let scan = run_step("Scan fonts", 1, total, || Ok(scan_fonts(source, &ctx.font_table)))?;
    let candidates =
        run_step("Aggregate candidates", 2, total, || Ok(Candidates::aggregate(&scan.fonts)))?;
    let resolved =
        run_step("Resolve characters", 3, total, || Ok(resolve(&candidates, &ctx.priority)))?;
    let (table, files) = run_step("Encode and verify tables", 4, total, || encode(ctx, &resolved))?;

    let written = if ctx.dry_run {
        Vec::new()
    } else {
        run_step("Write tables", 5, total, || {
            write_all(&files)?;
            Ok(files.into_iter().map(|(path, _)| path).collect())
        })?
    };

    let summary = BuildSummary {
        printable: fontmap_unicode::characters().count(),
        table,
        fonts_scanned: scan.fonts.len(),
        skipped: scan.skipped,
        written,
    };
    info!(
        "Resolved {} of {} printable characters to {} fonts in {:.2}s",
        summary.covered(),
        summary.printable,
        summary.selected_fonts(),
        start.elapsed().as_secs_f64()
    );
    Ok(summary)
}

fn encode(ctx: &PipelineContext, resolved: &Resolved) -> Result<(CharTable, Vec<(PathBuf, String)>)> {
    let table = CharTable::from_resolved(resolved.iter());
    let groups = FontGroups::encode(&table);
    verify(&table, &groups).context("Font-grouped table does not decode to the character table")?;

    let files = vec![
        (ctx.char_support_path(), table.to_json()?),
        (ctx.font_groups_path(), groups.to_json()?),
    ];
    Ok((table, files))
}
