//! Role → prompt resolution.
//!
//! [`PromptCatalog`] maps each [`Role`] to the system prompt sent with it and,
//! for `Validate` and `Summarize`, the user-prompt template. `Initial` has no
//! template: the raw question is sent verbatim.

use crate::core::error::DomainError;
use crate::prompt::template::PromptTemplate;
use crate::validation::role::Role;
use std::collections::HashMap;

/// Slot holding the original question
pub const SLOT_ORIGINAL_QUESTION: &str = "original_question";
/// Slot holding the answer being fact-checked
pub const SLOT_PREVIOUS_ANSWER: &str = "previous_answer";
/// Slot holding the rendered transcript of earlier stages
pub const SLOT_DISCUSSION: &str = "discussion";

const RESEARCH_SYSTEM: &str = "You are a research assistant.";

const FACT_CHECKER_SYSTEM: &str = "You are an experienced fact checker. \
You've worked for esteemed publications like The New Yorker and The Economist. \
You follow their best practices for fact checking.";

const VALIDATION_TEMPLATE: &str = "I asked this question to my friend: \"{original_question}\" \
and received this answer: \"{previous_answer}\". \
Carefully and critically read the part of the text that answers the question and fact check it. \
Ignore the rest of the text. \
Return the original text with your annotations and comments in markdown format. \
Use the same language as the original text.";

const SUMMARIZE_TEMPLATE: &str = "You've been given a fact checked discussion of a question. \
The question is: \"{original_question}\". \
The discussion is:\n\n{discussion}\n\n\
The answers contain annotations and comments in markdown format. \
Use the annotations and comments to produce one updated answer. \
Remove any information that does not answer the question. \
Just return the updated answer, do not include any other text. \
Use the same language as the original text.";

/// Prompts for one role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePrompt {
    pub system: String,
    /// `None` means the question is sent verbatim
    pub template: Option<PromptTemplate>,
}

impl RolePrompt {
    pub fn verbatim(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            template: None,
        }
    }

    pub fn templated(system: impl Into<String>, template: impl Into<PromptTemplate>) -> Self {
        Self {
            system: system.into(),
            template: Some(template.into()),
        }
    }
}

/// Read-only prompt table shared by every client adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCatalog {
    prompts: HashMap<Role, RolePrompt>,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        let mut prompts = HashMap::new();
        prompts.insert(Role::Initial, RolePrompt::verbatim(RESEARCH_SYSTEM));
        prompts.insert(
            Role::Validate,
            RolePrompt::templated(FACT_CHECKER_SYSTEM, VALIDATION_TEMPLATE),
        );
        prompts.insert(
            Role::Summarize,
            RolePrompt::templated(RESEARCH_SYSTEM, SUMMARIZE_TEMPLATE),
        );
        Self { prompts }
    }
}

impl PromptCatalog {
    /// A catalog with no entries; every lookup fails until roles are added
    pub fn empty() -> Self {
        Self {
            prompts: HashMap::new(),
        }
    }

    pub fn with_role(mut self, role: Role, prompt: RolePrompt) -> Self {
        self.prompts.insert(role, prompt);
        self
    }

    /// Resolve a role to its system prompt and optional user template
    pub fn resolve(&self, role: Role) -> Result<(&str, Option<&PromptTemplate>), DomainError> {
        self.prompts
            .get(&role)
            .map(|p| (p.system.as_str(), p.template.as_ref()))
            .ok_or_else(|| DomainError::UnknownRole(role.to_string()))
    }

    /// System prompt only
    pub fn system_prompt(&self, role: Role) -> Result<&str, DomainError> {
        self.resolve(role).map(|(system, _)| system)
    }

    /// Template for a role that requires one
    pub fn template(&self, role: Role) -> Result<&PromptTemplate, DomainError> {
        match self.resolve(role)? {
            (_, Some(template)) => Ok(template),
            (_, None) => Err(DomainError::UnknownRole(format!(
                "{role} (no user prompt template)"
            ))),
        }
    }

    /// Check that every role resolves, and that the templates carry the slots
    /// the pipeline fills. Called once before any backend is invoked.
    pub fn ensure_complete(&self) -> Result<(), DomainError> {
        self.system_prompt(Role::Initial)?;
        let validate = self.template(Role::Validate)?;
        if !validate.has_slot(SLOT_PREVIOUS_ANSWER) {
            return Err(DomainError::UnknownRole(format!(
                "validate (template is missing {{{SLOT_PREVIOUS_ANSWER}}})"
            )));
        }
        let summarize = self.template(Role::Summarize)?;
        if !summarize.has_slot(SLOT_DISCUSSION) {
            return Err(DomainError::UnknownRole(format!(
                "summarize (template is missing {{{SLOT_DISCUSSION}}})"
            )));
        }
        Ok(())
    }

    /// User prompt for a validation stage
    pub fn validation_prompt(
        &self,
        original_question: &str,
        previous_answer: &str,
    ) -> Result<String, DomainError> {
        Ok(self.template(Role::Validate)?.render(&[
            (SLOT_ORIGINAL_QUESTION, original_question),
            (SLOT_PREVIOUS_ANSWER, previous_answer),
        ]))
    }

    /// User prompt for a summarization stage
    pub fn summary_prompt(
        &self,
        original_question: &str,
        discussion: &str,
    ) -> Result<String, DomainError> {
        Ok(self.template(Role::Summarize)?.render(&[
            (SLOT_ORIGINAL_QUESTION, original_question),
            (SLOT_DISCUSSION, discussion),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_complete() {
        assert!(PromptCatalog::default().ensure_complete().is_ok());
    }

    #[test]
    fn test_initial_has_no_template() {
        let catalog = PromptCatalog::default();
        let (system, template) = catalog.resolve(Role::Initial).unwrap();
        assert_eq!(system, "You are a research assistant.");
        assert!(template.is_none());
    }

    #[test]
    fn test_validation_prompt_contains_both_slots() {
        let prompt = PromptCatalog::default()
            .validation_prompt("What is the capital of France?", "Paris")
            .unwrap();
        assert!(prompt.contains("\"What is the capital of France?\""));
        assert!(prompt.contains("\"Paris\""));
        assert!(!prompt.contains("{previous_answer}"));
    }

    #[test]
    fn test_summary_prompt_contains_discussion() {
        let prompt = PromptCatalog::default()
            .summary_prompt("Q?", "Question: Q?\nAnswer: Paris")
            .unwrap();
        assert!(prompt.contains("Question: Q?\nAnswer: Paris"));
        assert!(!prompt.contains("{discussion}"));
    }

    #[test]
    fn test_missing_role_is_unknown_role() {
        let catalog = PromptCatalog::empty().with_role(Role::Initial, RolePrompt::verbatim("s"));
        assert!(matches!(
            catalog.resolve(Role::Validate),
            Err(DomainError::UnknownRole(_))
        ));
        assert!(catalog.ensure_complete().is_err());
    }

    #[test]
    fn test_template_without_required_slot_is_rejected() {
        let catalog = PromptCatalog::default().with_role(
            Role::Summarize,
            RolePrompt::templated("s", "Summarize {original_question}"),
        );
        assert!(matches!(
            catalog.ensure_complete(),
            Err(DomainError::UnknownRole(_))
        ));
    }
}
