//! CLI module for Storyreel.

pub mod commands;
mod document;
mod output;
pub mod preflight;

pub use document::{read_document, write_document};
pub use output::Output;

use clap::{Parser, Subcommand};

/// Storyreel - Wikipedia to video storyboard
///
/// Fetch a Wikipedia article, have a model write a timed narration script,
/// edit the scenes on a timeline, synthesize narration and export the result.
#[derive(Parser, Debug)]
#[command(name = "storyreel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a Wikipedia article and show its sections
    Fetch {
        /// Wikipedia article URL
        url: String,

        /// Print the article as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch an article and generate a storyboard
    Generate {
        /// Wikipedia article URL
        url: String,

        /// Target video length in seconds
        #[arg(short, long)]
        duration: Option<u32>,

        /// Narration style (informative, engaging, documentary, casual)
        #[arg(short, long)]
        style: Option<String>,

        /// Write the storyboard document to a file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,

        /// Document title (defaults to the article title)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Edit the scenes of a storyboard document in place
    Edit {
        /// Storyboard document (JSON)
        file: String,

        #[command(subcommand)]
        action: EditAction,
    },

    /// Synthesize narration audio for a storyboard
    Narrate {
        /// Storyboard document (JSON)
        file: String,

        /// Voice (alloy, echo, fable, onyx, nova, shimmer)
        #[arg(long)]
        voice: Option<String>,

        /// Playback speed (0.25 - 4.0)
        #[arg(long)]
        speed: Option<f32>,

        /// Audio output file (defaults to the document name with .mp3)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Export a storyboard as JSON or subtitles
    Export {
        /// Storyboard document (JSON)
        file: String,

        /// Output format (json, srt, vtt)
        #[arg(long, default_value = "json")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Manage saved projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// List built-in video templates
    Templates,

    /// Start HTTP API server for the editing surface
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum EditAction {
    /// Show the scenes with their timeline positions
    Show,

    /// Replace a scene's narration text
    SetText {
        /// Scene index (0-based)
        #[arg(allow_hyphen_values = true)]
        index: i64,
        text: String,
    },

    /// Change a scene's duration (snapped to the editor range)
    SetDuration {
        /// Scene index (0-based)
        #[arg(allow_hyphen_values = true)]
        index: i64,
        /// Duration in seconds
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
    },

    /// Replace a scene's visual suggestion
    SetVisual {
        /// Scene index (0-based)
        #[arg(allow_hyphen_values = true)]
        index: i64,
        text: String,
    },

    /// Delete a scene
    Delete {
        /// Scene index (0-based)
        #[arg(allow_hyphen_values = true)]
        index: i64,
    },

    /// Split a scene in two at the middle of its text
    Split {
        /// Scene index (0-based)
        #[arg(allow_hyphen_values = true)]
        index: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    /// List recent projects
    List {
        /// Maximum number of projects (defaults to the configured page size)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a saved project
    Show {
        /// Project id
        id: String,
    },

    /// Save a storyboard document as a project
    Save {
        /// Storyboard document (JSON)
        file: String,

        /// Project title (defaults to the document title)
        #[arg(short, long)]
        title: Option<String>,

        /// Update an existing project instead of creating one
        #[arg(long)]
        id: Option<String>,
    },

    /// Write a saved project to a storyboard document
    Open {
        /// Project id
        id: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Delete a saved project
    Delete {
        /// Project id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
