//! Building and verifying the character tables.

use std::{path::Path, time::Instant};

use anyhow::Result;
use fontmap_core::{PipelineContext, verify_outputs};

const RULE: &str =
    "═══════════════════════════════════════════════════════════════════════════════";

pub fn build(ctx: &PipelineContext) -> Result<()> {
    let start = Instant::now();

    println!("{RULE}");
    println!("Character table build");
    println!("{RULE}");

    let summary = fontmap_core::build(ctx)?;

    println!("\n{RULE}");
    println!("✨ Build complete in {:.2}s", start.elapsed().as_secs_f64());
    println!(
        "   Characters: {} of {} printable ({:.2}%)",
        summary.covered(),
        summary.printable,
        summary.coverage_percent()
    );
    println!(
        "   Fonts: {} selected of {} scanned",
        summary.selected_fonts(),
        summary.fonts_scanned
    );
    if !summary.skipped.is_empty() {
        println!("   Skipped {} fonts:", summary.skipped.len());
        for font in &summary.skipped {
            println!("     {} ({}): {}", font.name, font.path.display(), font.reason);
        }
    }
    if summary.written.is_empty() {
        println!("   Dry run, nothing written");
    }
    for path in &summary.written {
        println!("   Output: {}", path.display());
    }
    println!("{RULE}");
    Ok(())
}

pub fn verify(resources_dir: &Path) -> Result<()> {
    let table = verify_outputs(resources_dir)?;
    println!(
        "✓ {} characters across {} fonts, both tables agree",
        table.len(),
        table.fonts().len()
    );
    Ok(())
}
