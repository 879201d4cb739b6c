//! Contextual augmentation of a query with retrieved documents.
//!
//! ```rust
//! use wquery::{ContextualQueryAugmenter, Document, Query};
//!
//! let augmenter = ContextualQueryAugmenter::new();
//! let augmented = augmenter.augment(
//!     &Query::new("when did retries land?"),
//!     &[Document::new("Retries landed in 4.2.")],
//! );
//!
//! assert!(augmented.text.contains("Retries landed in 4.2."));
//! ```

use crate::{Document, PromptTemplate, Query};

const DEFAULT_TEMPLATE: &str = "Context information is below.\n\n\
---------------------\n\
{context}\n\
---------------------\n\n\
Given the context information and no prior knowledge, answer the query.\n\n\
Query: {query}\n\n\
Answer:";

const DEFAULT_EMPTY_CONTEXT_TEMPLATE: &str = "The retrieval pass found no context for this query. \
Answer from general knowledge and say so when you cannot.";

/// Pure transform from a query plus retrieved documents to a new query.
///
/// With no documents the original query passes through unchanged unless
/// empty context is disallowed, in which case the empty-context template's
/// raw text replaces the query entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextualQueryAugmenter {
    template: PromptTemplate,
    empty_context_template: PromptTemplate,
    allow_empty_context: bool,
}

impl Default for ContextualQueryAugmenter {
    fn default() -> Self {
        Self {
            template: PromptTemplate::new(DEFAULT_TEMPLATE),
            empty_context_template: PromptTemplate::new(DEFAULT_EMPTY_CONTEXT_TEMPLATE),
            allow_empty_context: true,
        }
    }
}

impl ContextualQueryAugmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_empty_context_template(mut self, template: PromptTemplate) -> Self {
        self.empty_context_template = template;
        self
    }

    pub fn allow_empty_context(mut self, allow_empty_context: bool) -> Self {
        self.allow_empty_context = allow_empty_context;
        self
    }

    pub fn augment(&self, query: &Query, documents: &[Document]) -> Query {
        if documents.is_empty() {
            if self.allow_empty_context {
                return query.clone();
            }
            return Query::new(self.empty_context_template.raw());
        }

        let context = documents
            .iter()
            .map(|document| document.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Query::new(
            self.template
                .render(&[("context", context.as_str()), ("query", query.text.as_str())]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_documents_pass_the_query_through_by_default() {
        let augmenter = ContextualQueryAugmenter::new();
        let query = Query::new("untouched");

        assert_eq!(augmenter.augment(&query, &[]), query);
    }

    #[test]
    fn disallowed_empty_context_substitutes_the_raw_template() {
        let augmenter = ContextualQueryAugmenter::new()
            .allow_empty_context(false)
            .with_empty_context_template(PromptTemplate::new("no context available"));

        let augmented = augmenter.augment(&Query::new("ignored entirely"), &[]);
        assert_eq!(augmented, Query::new("no context available"));
    }

    #[test]
    fn documents_render_newline_joined_into_the_context_slot() {
        let augmenter = ContextualQueryAugmenter::new()
            .with_template(PromptTemplate::new("Context:\n{context}\n\nQuery:\n{query}\n"));

        let augmented = augmenter.augment(
            &Query::new("test query"),
            &[Document::new("content1"), Document::new("content2")],
        );

        assert_eq!(
            augmented.text,
            "Context:\ncontent1\ncontent2\n\nQuery:\ntest query\n"
        );
    }
}
