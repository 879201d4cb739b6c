//! Retrieval-augmentation advisors for the chat chain.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wchat::{AdvisedRequest, Advisor, ChatError};
use wcommon::BoxFuture;
use wprovider::{ChatModel, Prompt};

use crate::{
    ContextualQueryAugmenter, PromptTemplate, Query, QueryError, SearchRequest, VectorStore,
};

/// Context property key under which retrieved documents are stashed.
pub const RETRIEVED_DOCUMENTS_KEY: &str = "wquery.retrieved_documents";

/// Literal the extractor model emits when the query implies no filter.
pub const NO_FILTER: &str = "NO_FILTER";

const DEFAULT_EXTRACTION_TEMPLATE: &str = "Rewrite the user query for vector search and extract a \
metadata filter expression from it.\n\
The filterable attributes are described by this JSON schema:\n\
{schema}\n\n\
Respond with a single JSON object of the shape \
{\"query\": \"...\", \"filter\": \"...\"}.\n\
When the query implies no filter, use the literal NO_FILTER.\n\n\
User query: {query}";

/// One filterable attribute advertised to the extractor model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInfo {
    pub name: String,
    pub description: String,
    pub value_type: String,
}

impl AttributeInfo {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value_type: value_type.into(),
        }
    }
}

/// Request-side advisor that searches a vector store with the last user
/// message and rewrites that message with the retrieved context.
pub struct RetrievalAugmentationAdvisor {
    store: Arc<dyn VectorStore>,
    base_request: SearchRequest,
    augmenter: ContextualQueryAugmenter,
}

impl RetrievalAugmentationAdvisor {
    pub fn new(store: Arc<dyn VectorStore>, base_request: SearchRequest) -> Self {
        Self {
            store,
            base_request,
            augmenter: ContextualQueryAugmenter::new(),
        }
    }

    pub fn with_augmenter(mut self, augmenter: ContextualQueryAugmenter) -> Self {
        self.augmenter = augmenter;
        self
    }

    pub fn base_request(&self) -> &SearchRequest {
        &self.base_request
    }

    /// Shared augmentation path: search with `search_request`, render the
    /// augmented query, rewrite the last user message, and record the
    /// retrieved documents under this advisor's context key.
    pub async fn retrieve_and_augment(
        &self,
        request: AdvisedRequest,
        search_request: &SearchRequest,
        query: &Query,
    ) -> Result<AdvisedRequest, ChatError> {
        let documents = self
            .store
            .search(search_request)
            .await
            .map_err(ChatError::from)?;

        let documents_value = serde_json::to_value(&documents)
            .map_err(|error| ChatError::other(format!("failed to encode documents: {error}")))?;

        let augmented = self.augmenter.augment(query, &documents);
        let context = request
            .context
            .clone()
            .with_property(RETRIEVED_DOCUMENTS_KEY, documents_value);

        Ok(request
            .map_prompt(|prompt| prompt.with_last_user_text(augmented.text))
            .with_context(context))
    }
}

impl Advisor for RetrievalAugmentationAdvisor {
    fn name(&self) -> &str {
        "retrieval-augmentation"
    }

    fn advise_request<'a>(
        &'a self,
        request: AdvisedRequest,
    ) -> BoxFuture<'a, Result<AdvisedRequest, ChatError>> {
        Box::pin(async move {
            let Some(user_text) = request.prompt.last_user_text().map(str::to_string) else {
                return Ok(request);
            };

            let query = Query::new(user_text.as_str());
            let search_request = self.base_request.to_builder().query(user_text).build();
            self.retrieve_and_augment(request, &search_request, &query)
                .await
        })
    }
}

#[derive(Debug, Deserialize)]
struct ExtractedQuery {
    query: String,
    filter: String,
}

/// Request-side advisor that asks an auxiliary model to split the user
/// query into a rewritten query plus a metadata filter, then delegates to
/// retrieval augmentation with the extracted values.
///
/// Extraction failures (model call or JSON shape) fail the whole
/// invocation; there is no retry and no partial result.
pub struct StructuredQueryAdvisor {
    extractor: Arc<dyn ChatModel>,
    retrieval: RetrievalAugmentationAdvisor,
    attributes: Vec<AttributeInfo>,
    template: PromptTemplate,
}

impl StructuredQueryAdvisor {
    pub fn new(
        extractor: Arc<dyn ChatModel>,
        retrieval: RetrievalAugmentationAdvisor,
        attributes: Vec<AttributeInfo>,
    ) -> Self {
        Self {
            extractor,
            retrieval,
            attributes,
            template: PromptTemplate::new(DEFAULT_EXTRACTION_TEMPLATE),
        }
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    async fn extract(&self, user_text: &str) -> Result<ExtractedQuery, QueryError> {
        let schema = serde_json::to_string(&self.attributes).map_err(|error| {
            QueryError::invalid_request(format!("failed to serialize attribute schema: {error}"))
        })?;

        let rendered = self
            .template
            .render(&[("schema", schema.as_str()), ("query", user_text)]);

        let response = self.extractor.call(Prompt::from_text(rendered)).await?;
        let body = strip_code_fences(response.text());

        serde_json::from_str(body).map_err(|error| {
            QueryError::malformed_output(format!(
                "extractor output is not a query/filter object: {error}"
            ))
        })
    }
}

impl Advisor for StructuredQueryAdvisor {
    fn name(&self) -> &str {
        "structured-query"
    }

    fn advise_request<'a>(
        &'a self,
        request: AdvisedRequest,
    ) -> BoxFuture<'a, Result<AdvisedRequest, ChatError>> {
        Box::pin(async move {
            let Some(user_text) = request.prompt.last_user_text().map(str::to_string) else {
                return Ok(request);
            };

            let extracted = self.extract(&user_text).await.map_err(ChatError::from)?;

            let mut builder = self
                .retrieval
                .base_request()
                .to_builder()
                .query(extracted.query.clone());
            if extracted.filter != NO_FILTER {
                builder = builder.filter(extracted.filter);
            }
            let search_request = builder.build();

            self.retrieval
                .retrieve_and_augment(request, &search_request, &Query::new(extracted.query))
                .await
        })
    }
}

/// Models frequently wrap JSON in markdown fences; tolerate that one quirk.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
