//! Minimal `{slot}` substitution used by query transforms.
//!
//! ```rust
//! use wquery::PromptTemplate;
//!
//! let template = PromptTemplate::new("Hello {name}");
//! assert_eq!(template.render(&[("name", "weft")]), "Hello weft");
//! ```

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.template
    }

    /// Substitutes each `{key}` slot; slots with no matching key stay verbatim.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut rendered = self.template.clone();
        for (key, value) in values {
            rendered = rendered.replace(&format!("{{{key}}}"), value);
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_all_named_slots() {
        let template = PromptTemplate::new("Context:\n{context}\n\nQuery:\n{query}\n");
        let rendered = template.render(&[("context", "c1\nc2"), ("query", "test query")]);
        assert_eq!(rendered, "Context:\nc1\nc2\n\nQuery:\ntest query\n");
    }

    #[test]
    fn unmatched_slots_are_left_in_place() {
        let template = PromptTemplate::new("{known} and {unknown}");
        assert_eq!(template.render(&[("known", "value")]), "value and {unknown}");
    }
}
