//! CLI command implementations.

mod config;
mod edit;
mod export;
mod fetch;
mod generate;
mod narrate;
mod projects;
mod serve;
mod templates;

pub use config::run_config;
pub use edit::run_edit;
pub use export::run_export;
pub use fetch::run_fetch;
pub use generate::run_generate;
pub use narrate::run_narrate;
pub use projects::run_projects;
pub use serve::run_serve;
pub use templates::run_templates;
