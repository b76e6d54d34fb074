//! Templates command implementation.

use crate::cli::Output;
use crate::project::templates;
use anyhow::Result;

/// Run the templates command.
pub fn run_templates() -> Result<()> {
    Output::header("Video Templates");

    for template in templates() {
        println!();
        Output::list_item(&format!("{} ({})", template.name, template.id));
        Output::kv("Style", template.description);
        Output::kv("Font", template.font_family);
        Output::kv(
            "Colors",
            &format!("{} / {}", template.primary_color, template.secondary_color),
        );
        Output::kv("Transitions", template.transition_style);
        Output::kv("Music", template.music_genre);
    }

    Ok(())
}
