//! Coverage reports and character lookups.

use std::path::Path;

use anyhow::Result;
use fontmap_core::{CharCheck, PipelineContext, check_text, coverage_report};

pub fn coverage(ctx: &PipelineContext) {
    let report = coverage_report(ctx);

    for font in &report.fonts {
        println!("{} ({} characters)", font.identity, font.characters);
        for block in &font.blocks {
            println!("  {:<48} {:>6}/{:<6}", block.block, block.covered, block.total);
        }
    }
    for font in &report.skipped {
        println!("skipped {} ({}): {}", font.name, font.path.display(), font.reason);
    }
}

pub fn check(ctx: &PipelineContext, text: &str) -> Result<()> {
    for check in check_text(ctx, text)? {
        print_check(&check);
    }
    Ok(())
}

fn print_check(check: &CharCheck) {
    let info = &check.classification;
    println!(
        "U+{:04X} {:?} [{}] {}{}",
        info.codepoint,
        check.c,
        info.category_tag(),
        info.block,
        if info.printable { "" } else { " (unprintable)" }
    );

    for candidate in &check.candidates {
        let rank = candidate.rank.map_or_else(|| "-".to_string(), |rank| rank.to_string());
        println!(
            "  {:<40} rank {:>3}  block coverage {}",
            candidate.font, rank, candidate.block_coverage
        );
    }
    match &check.resolved {
        Some(font) => println!("  → {font}"),
        None => println!("  → no font"),
    }
}

pub fn lookup(resources_dir: &Path, text: &str) -> Result<()> {
    for (c, font) in fontmap_core::lookup(resources_dir, text)? {
        println!("U+{:04X} {c:?} {}", c as u32, font.as_deref().unwrap_or("-"));
    }
    Ok(())
}
