//! CLI progress display utilities
//!
//! Step lines in the style `[2/5] ⚙️  Converting a.lba`, with ASCII
//! fallbacks for terminals without emoji support.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::HumanDuration;

/// Magnifying glass - for loading dictionaries
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Gear - for conversions
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Document - for hash dumps
pub static DOCUMENT: Emoji<'_, '_> = Emoji("📄 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Cross - for failures
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "x ");

/// Print a step indicator: `[1/3] ⚙️  Message`
pub fn print_step(current: usize, total: usize, emoji: &Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print a failure line in red.
pub fn print_failure(msg: &str) {
    eprintln!("{}{}", CROSS, style(msg).red());
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}
