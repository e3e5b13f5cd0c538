//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Pairs
//! 0001 A.png + b.png → combined_image_0001.jpg
//! 0002 c.jpg + (blank) → combined_image_0002.jpg
//!
//! 3 images → 2 pairs
//! ```
//!
//! ## Compose
//!
//! ```text
//! Docking 3 images from photos into docked (2 pairs)
//! 0001 A.png + b.png
//!     → combined_image_0001.jpg (300x100)
//! 0002 c.jpg + (blank)
//!     → combined_image_0002.jpg (128x48)
//! Wrote 2 files
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::compose::{PlannedPair, RunEvent};

const FILLER_LABEL: &str = "(blank)";

/// Format a 1-based pair index the same way output files are numbered.
fn format_index(pos: usize) -> String {
    format!("{:0>4}", pos)
}

/// Format a pair header: index, then both halves.
///
/// ```text
/// 0001 A.png + b.png
/// 0002 c.jpg + (blank)
/// ```
fn pair_line(index: usize, first: &str, second: Option<&str>) -> String {
    format!(
        "{} {} + {}",
        format_index(index),
        first,
        second.unwrap_or(FILLER_LABEL)
    )
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the dry-run pair plan.
pub fn format_plan(plan: &[PlannedPair]) -> Vec<String> {
    let mut lines = vec!["Pairs".to_string()];
    for pair in plan {
        lines.push(format!(
            "{} \u{2192} {}",
            pair_line(pair.index, &pair.first, pair.second.as_deref()),
            pair.output
        ));
    }

    let images: usize = plan
        .iter()
        .map(|p| if p.second.is_some() { 2 } else { 1 })
        .sum();
    lines.push(String::new());
    lines.push(format!(
        "{} \u{2192} {}",
        plural(images, "image"),
        plural(plan.len(), "pair")
    ));
    lines
}

/// Print the dry-run pair plan to stdout.
pub fn print_plan(plan: &[PlannedPair]) {
    for line in format_plan(plan) {
        println!("{}", line);
    }
}

// ============================================================================
// compose
// ============================================================================

/// Format a single run progress event as display lines.
pub fn format_run_event(event: &RunEvent) -> Vec<String> {
    match event {
        RunEvent::Started {
            input,
            output,
            images,
            pairs,
        } => vec![format!(
            "Docking {} from {} into {} ({})",
            plural(*images, "image"),
            input.display(),
            output.display(),
            plural(*pairs, "pair")
        )],
        RunEvent::PairWritten {
            index,
            first,
            second,
            output,
            width,
            height,
        } => vec![
            pair_line(*index, first, second.as_deref()),
            format!("    \u{2192} {} ({}x{})", output, width, height),
        ],
        RunEvent::Finished { written } => vec![format!("Wrote {}", plural(*written, "file"))],
    }
}
