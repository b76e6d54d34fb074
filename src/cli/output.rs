//! CLI output formatting utilities.

use crate::project::ProjectSummary;
use crate::timeline::{Scene, SceneLayout};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print one timeline scene with its position.
    pub fn scene(scene: &Scene, layout: &SceneLayout) {
        println!(
            "\n{} {} [{} - {}] {:.1}s ({:.0}%)",
            style(">>").green(),
            style(format!("Scene {}", layout.index)).bold(),
            style(format_timestamp(layout.start)).cyan(),
            style(format_timestamp(layout.end)).cyan(),
            scene.duration,
            layout.width_fraction * 100.0
        );
        println!("   {}", content_preview(&scene.text, 200));
        if !scene.visual_suggestion.is_empty() {
            println!("   {}", style(content_preview(&scene.visual_suggestion, 120)).dim());
        }
    }

    /// Print a project listing entry.
    pub fn project_info(project: &ProjectSummary) {
        println!(
            "  {} {} ({}, {} scenes, updated {})",
            style("*").cyan(),
            style(&project.title).bold(),
            style(project.id).dim(),
            project.scene_count,
            project.updated_at.format("%Y-%m-%d %H:%M")
        );
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Format seconds as m:ss.s for scene positions.
pub fn format_timestamp(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = seconds - (minutes as f64 * 60.0);
    format!("{}:{:04.1}", minutes, secs)
}

/// Format duration in seconds to a human-readable string.
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds.round() as u32;
    let minutes = total_seconds / 60;
    let secs = total_seconds % 60;

    if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Truncate content with ellipsis.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let head: String = content.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
