//! Prompt templates for Storyreel.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    /// Prompts for narration script writing.
    pub script: ScriptPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for turning article text into a scene-by-scene narration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptPrompts {
    pub system: String,
    pub user: String,
}

impl Default for ScriptPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a professional video script writer specializing in converting Wikipedia articles into compelling video narrations.

Your task:
1. Convert the provided content into a natural, engaging video script
2. Target duration: approximately {{duration}} seconds (roughly {{word_target}} words)
3. Style: {{style_instruction}}
4. Structure the script with clear narrative flow
5. Include natural pauses and emphasis points marked with [pause]
6. Make it engaging for viewers while remaining factually accurate

Format your response as a JSON object with:
{
  "script": "the complete narration script",
  "estimatedDuration": number in seconds,
  "wordCount": number of words,
  "scenes": [
    {
      "text": "narration for this scene",
      "duration": seconds,
      "visualSuggestion": "description of what should be shown"
    }
  ]
}

Every scene duration must be a positive number of seconds."#
                .to_string(),

            user: r#"Title: {{title}}

Content:
{{content}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let script_path = custom_path.join("script.toml");
            if script_path.exists() {
                let content = std::fs::read_to_string(&script_path)?;
                prompts.script = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are substituted in one pass over the template, so text
    /// inserted for one variable is never scanned for others. Unknown
    /// placeholders are left as written.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        placeholder_regex()
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid regex"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.script.system.contains("{{word_target}}"));
        assert!(prompts.script.user.contains("{{content}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Target {{duration}} seconds, about {{word_target}} words.";
        let mut vars = HashMap::new();
        vars.insert("duration".to_string(), "60".to_string());
        vars.insert("word_target".to_string(), "24".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Target 60 seconds, about 24 words.");
    }

    #[test]
    fn test_render_leaves_placeholders_inside_values() {
        let template = "Title: {{title}}\n{{content}}\n{{unknown}}";
        let mut vars = HashMap::new();
        vars.insert("title".to_string(), "Templates".to_string());
        vars.insert(
            "content".to_string(),
            "Write {{title}} for {{duration}} seconds.".to_string(),
        );
        vars.insert("duration".to_string(), "60".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(
            result,
            "Title: Templates\nWrite {{title}} for {{duration}} seconds.\n{{unknown}}"
        );
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut custom = HashMap::new();
        custom.insert("audience".to_string(), "students".to_string());
        custom.insert("title".to_string(), "ignored".to_string());
        let prompts = Prompts::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("title".to_string(), "Rust".to_string());

        let rendered = prompts.render_with_custom("{{title}} for {{audience}}", &vars);
        assert_eq!(rendered, "Rust for students");
    }

    #[test]
    fn test_load_custom_script_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("script.toml"),
            "system = \"Be brief.\"\nuser = \"{{content}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.script.system, "Be brief.");
        assert_eq!(prompts.script.user, "{{content}}");
    }
}
