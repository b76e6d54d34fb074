//! Export command implementation.

use crate::cli::{read_document, Output};
use crate::script::{format_storyboard, ExportFormat};
use anyhow::Result;

/// Run the export command.
pub fn run_export(file: &str, format: &str, output: Option<String>) -> Result<()> {
    let export_format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let document = read_document(file)?;
    let Some(script) = document.script else {
        Output::error(&format!("'{}' has no script to export.", document.title));
        Output::info("Use 'storyreel generate <url> -o <file>' to create one.");
        return Ok(());
    };

    let output_str = format_storyboard(&document.title, &script, export_format);

    match output {
        Some(path) if path != "-" => {
            std::fs::write(&path, &output_str)?;
            Output::success(&format!(
                "Exported '{}' to {} ({} scenes)",
                document.title,
                path,
                script.scenes.len()
            ));
        }
        _ => {
            println!("{}", output_str);
        }
    }

    Ok(())
}
