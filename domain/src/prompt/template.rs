//! Prompt templates with named substitution slots

use serde::{Deserialize, Serialize};

/// A user-prompt template containing `{slot}` placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the template references `{slot}`
    pub fn has_slot(&self, slot: &str) -> bool {
        self.text.contains(&format!("{{{slot}}}"))
    }

    /// Fill the template's slots.
    ///
    /// Every `{name}` with a matching entry is replaced; placeholders without
    /// an entry are left untouched. Substituted values are not rescanned, so
    /// an answer that itself contains `{original_question}` stays literal.
    pub fn render(&self, slots: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();

        while let Some(open) = rest.find('{') {
            output.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let replacement = after.find('}').and_then(|close| {
                let name = &after[..close];
                slots
                    .iter()
                    .find(|(slot, _)| *slot == name)
                    .map(|(_, value)| (close, *value))
            });

            match replacement {
                Some((close, value)) => {
                    output.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    output.push('{');
                    rest = after;
                }
            }
        }

        output.push_str(rest);
        output
    }
}

impl From<&str> for PromptTemplate {
    fn from(s: &str) -> Self {
        PromptTemplate::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_named_slots() {
        let template = PromptTemplate::new("Q: \"{original_question}\" A: \"{previous_answer}\"");
        let prompt = template.render(&[
            ("original_question", "What is the capital of France?"),
            ("previous_answer", "Paris"),
        ]);
        assert_eq!(prompt, "Q: \"What is the capital of France?\" A: \"Paris\"");
    }

    #[test]
    fn test_render_leaves_unknown_slots() {
        let template = PromptTemplate::new("{known} and {unknown}");
        assert_eq!(template.render(&[("known", "x")]), "x and {unknown}");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let template = PromptTemplate::new("{previous_answer} / {original_question}");
        let prompt = template.render(&[
            ("previous_answer", "use {original_question} here"),
            ("original_question", "Q"),
        ]);
        assert_eq!(prompt, "use {original_question} here / Q");
    }

    #[test]
    fn test_render_unbalanced_braces() {
        let template = PromptTemplate::new("json {\"a\": 1} and {slot");
        assert_eq!(
            template.render(&[("slot", "x")]),
            "json {\"a\": 1} and {slot"
        );
    }

    #[test]
    fn test_has_slot() {
        let template = PromptTemplate::new("Discussion:\n{discussion}");
        assert!(template.has_slot("discussion"));
        assert!(!template.has_slot("previous_answer"));
    }
}
