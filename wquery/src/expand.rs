//! Multi-query expansion via a single model call.

use std::sync::Arc;

use wprovider::{ChatModel, Prompt};

use crate::{PromptTemplate, Query, QueryError};

const DEFAULT_NUMBER_OF_QUERIES: usize = 3;

const DEFAULT_EXPANSION_TEMPLATE: &str = "You are an expert at rephrasing search queries.\n\
Generate {number} alternative phrasings of the query below, one per line.\n\
Do not number them and do not add commentary.\n\n\
Query: {query}";

/// Expands one query into several alternative phrasings.
///
/// The model's reply is split on non-empty lines; nothing checks that the
/// model produced the requested count, so uncooperative output yields a
/// wrong-sized list rather than an error.
pub struct MultiQueryExpander {
    model: Arc<dyn ChatModel>,
    number_of_queries: usize,
    include_original: bool,
    template: PromptTemplate,
}

impl MultiQueryExpander {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            number_of_queries: DEFAULT_NUMBER_OF_QUERIES,
            include_original: false,
            template: PromptTemplate::new(DEFAULT_EXPANSION_TEMPLATE),
        }
    }

    pub fn with_number_of_queries(mut self, number_of_queries: usize) -> Self {
        self.number_of_queries = number_of_queries.max(1);
        self
    }

    pub fn include_original(mut self, include_original: bool) -> Self {
        self.include_original = include_original;
        self
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub async fn expand(&self, query: &Query) -> Result<Vec<Query>, QueryError> {
        let rendered = self.template.render(&[
            ("number", self.number_of_queries.to_string().as_str()),
            ("query", query.text.as_str()),
        ]);

        let response = self.model.call(Prompt::from_text(rendered)).await?;

        let mut expanded: Vec<Query> = response
            .text()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Query::new)
            .collect();

        if self.include_original {
            expanded.insert(0, query.clone());
        }

        Ok(expanded)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use wprovider::{
        BoxedResponseStream, ChatResponse, ModelError, ModelFuture,
    };

    use super::*;
    use crate::QueryErrorKind;

    struct LineModel {
        reply: String,
        prompts: Mutex<Vec<Prompt>>,
    }

    impl LineModel {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatModel for LineModel {
        fn model_name(&self) -> &str {
            "line-model"
        }

        fn call<'a>(&'a self, prompt: Prompt) -> ModelFuture<'a, Result<ChatResponse, ModelError>> {
            Box::pin(async move {
                self.prompts.lock().expect("prompts lock").push(prompt);
                Ok(ChatResponse::from_text("line-model", self.reply.clone()))
            })
        }

        fn stream<'a>(
            &'a self,
            _prompt: Prompt,
        ) -> ModelFuture<'a, Result<BoxedResponseStream<'a>, ModelError>> {
            Box::pin(async {
                Err(ModelError::invalid_request(
                    "streaming not needed for this test model",
                ))
            })
        }
    }

    struct BrokenModel;

    impl ChatModel for BrokenModel {
        fn model_name(&self) -> &str {
            "broken-model"
        }

        fn call<'a>(
            &'a self,
            _prompt: Prompt,
        ) -> ModelFuture<'a, Result<ChatResponse, ModelError>> {
            Box::pin(async { Err(ModelError::unavailable("upstream outage")) })
        }

        fn stream<'a>(
            &'a self,
            _prompt: Prompt,
        ) -> ModelFuture<'a, Result<BoxedResponseStream<'a>, ModelError>> {
            Box::pin(async { Err(ModelError::unavailable("upstream outage")) })
        }
    }

    #[tokio::test]
    async fn expansion_returns_one_query_per_output_line() {
        let model = Arc::new(LineModel::new(
            "variant one\nvariant two\nvariant three\nvariant four",
        ));
        let expander = MultiQueryExpander::new(model).with_number_of_queries(4);

        let expanded = expander
            .expand(&Query::new("original"))
            .await
            .expect("expansion should work");

        assert_eq!(expanded.len(), 4);
        assert_eq!(expanded[0], Query::new("variant one"));
        assert_eq!(expanded[3], Query::new("variant four"));
    }

    #[tokio::test]
    async fn include_original_prepends_the_source_query() {
        let model = Arc::new(LineModel::new(
            "variant one\nvariant two\nvariant three\nvariant four",
        ));
        let expander = MultiQueryExpander::new(model)
            .with_number_of_queries(4)
            .include_original(true);

        let expanded = expander
            .expand(&Query::new("original"))
            .await
            .expect("expansion should work");

        assert_eq!(expanded.len(), 5);
        assert_eq!(expanded[0], Query::new("original"));
    }

    #[tokio::test]
    async fn template_slots_carry_count_and_query_to_the_model() {
        let model = Arc::new(LineModel::new("a\nb"));
        let expander = MultiQueryExpander::new(model.clone()).with_number_of_queries(2);

        let _ = expander
            .expand(&Query::new("find the retry policy"))
            .await
            .expect("expansion should work");

        let prompts = model.prompts.lock().expect("prompts lock");
        let sent = prompts[0].last_user_text().expect("prompt user text");
        assert!(sent.contains("Generate 2 alternative phrasings"));
        assert!(sent.contains("Query: find the retry policy"));
    }

    #[tokio::test]
    async fn blank_lines_are_dropped_rather_than_padded() {
        let model = Arc::new(LineModel::new("only one\n\n   \n"));
        let expander = MultiQueryExpander::new(model).with_number_of_queries(4);

        let expanded = expander
            .expand(&Query::new("original"))
            .await
            .expect("expansion should work");

        // wrong-sized output is the caller's problem, not an error
        assert_eq!(expanded, vec![Query::new("only one")]);
    }

    #[tokio::test]
    async fn model_failures_surface_as_query_errors() {
        let expander = MultiQueryExpander::new(Arc::new(BrokenModel));

        let error = expander
            .expand(&Query::new("original"))
            .await
            .expect_err("expansion should fail");

        assert_eq!(error.kind, QueryErrorKind::Model);
    }
}
