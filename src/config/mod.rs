//! Configuration module for Storyreel.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, ScriptPrompts};
pub use settings::{
    GeneralSettings, NarrationSettings, PromptSettings, ScriptSettings, Settings,
    StoreSettings, WikipediaSettings,
};
