//! Coverage reports and per-character diagnostics.

use std::collections::HashSet;

use anyhow::Result;
use font_coverage::{CoverageSource, FontFileSource, FontIdentity, SkippedFont, scan_fonts};
use fontmap_resolver::{Candidates, ranked_candidates};
use fontmap_unicode::{Classification, blocks, classify};

use super::PipelineContext;

/// Covered characters of one block against its printable total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCoverage {
    pub block: &'static str,
    pub covered: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct FontReport {
    pub identity: FontIdentity,
    pub characters: usize,
    /// Blocks the font covers at least partially, by block name.
    pub blocks: Vec<BlockCoverage>,
}

#[derive(Debug, Default)]
pub struct CoverageReport {
    pub fonts: Vec<FontReport>,
    pub skipped: Vec<SkippedFont>,
}

pub fn coverage_report(ctx: &PipelineContext) -> CoverageReport {
    coverage_report_with(ctx, &FontFileSource::new())
}

pub fn coverage_report_with(ctx: &PipelineContext, source: &impl CoverageSource) -> CoverageReport {
    let scan = scan_fonts(source, &ctx.font_table);
    let totals = blocks();

    let fonts = scan
        .fonts
        .into_iter()
        .map(|font| {
            let blocks = font
                .coverage
                .blocks()
                .map(|(block, chars)| BlockCoverage {
                    block,
                    covered: chars.len(),
                    total: totals.get(block).map_or(0, Vec::len),
                })
                .collect();
            FontReport { characters: font.coverage.len(), blocks, identity: font.identity }
        })
        .collect();

    CoverageReport { fonts, skipped: scan.skipped }
}

/// A candidate font for one character with the keys it is ranked by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateCheck {
    pub font: String,
    pub rank: Option<usize>,
    /// Characters the font covers in the character's block.
    pub block_coverage: usize,
}

#[derive(Debug, Clone)]
pub struct CharCheck {
    pub c: char,
    pub classification: Classification,
    /// Best candidate first.
    pub candidates: Vec<CandidateCheck>,
    pub resolved: Option<String>,
}

pub fn check_text(ctx: &PipelineContext, text: &str) -> Result<Vec<CharCheck>> {
    check_text_with(ctx, &FontFileSource::new(), text)
}

/// Explain the resolution of each distinct character of `text`.
pub fn check_text_with(
    ctx: &PipelineContext,
    source: &impl CoverageSource,
    text: &str,
) -> Result<Vec<CharCheck>> {
    let scan = scan_fonts(source, &ctx.font_table);
    let candidates = Candidates::aggregate(&scan.fonts);

    let mut seen = HashSet::new();
    text.chars()
        .filter(|c| seen.insert(*c))
        .map(|c| -> Result<CharCheck> {
            let classification = classify(c as u32)?;
            let ranked: Vec<CandidateCheck> = ranked_candidates(c, &candidates, &ctx.priority)
                .into_iter()
                .map(|(font, key)| CandidateCheck {
                    font: font.to_string(),
                    rank: key.rank,
                    block_coverage: key.cov,
                })
                .collect();
            let resolved = ranked.first().map(|candidate| candidate.font.clone());
            Ok(CharCheck { c, classification, candidates: ranked, resolved })
        })
        .collect()
}
