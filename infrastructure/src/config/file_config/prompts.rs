//! Prompt overrides from TOML (`[prompts]` section)

use crossval_domain::{PromptCatalog, PromptTemplate, Role, RolePrompt};
use serde::{Deserialize, Serialize};

/// Raw prompt overrides; unset fields keep the built-in text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromptsConfig {
    /// System prompt for the initial answer
    pub initial_system: Option<String>,
    /// System prompt for fact-checking stages
    pub validate_system: Option<String>,
    /// System prompt for the summary
    pub summarize_system: Option<String>,
    /// Fact-check template; slots `{original_question}`, `{previous_answer}`
    pub validate_template: Option<String>,
    /// Summary template; slots `{original_question}`, `{discussion}`
    pub summarize_template: Option<String>,
}

impl FilePromptsConfig {
    /// Built-in catalog with the configured overrides applied
    pub fn to_catalog(&self) -> PromptCatalog {
        let base = PromptCatalog::default();
        let mut catalog = base.clone();

        for (role, system, template) in [
            (Role::Initial, &self.initial_system, &None),
            (Role::Validate, &self.validate_system, &self.validate_template),
            (Role::Summarize, &self.summarize_system, &self.summarize_template),
        ] {
            if system.is_none() && template.is_none() {
                continue;
            }
            let Ok((base_system, base_template)) = base.resolve(role) else {
                continue;
            };
            let prompt = RolePrompt {
                system: system.clone().unwrap_or_else(|| base_system.to_string()),
                template: template
                    .as_deref()
                    .map(PromptTemplate::from)
                    .or_else(|| base_template.cloned()),
            };
            catalog = catalog.with_role(role, prompt);
        }

        catalog
    }
}
