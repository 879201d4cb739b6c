//! Query transformation and retrieval augmentation for the advisor chain.

mod augment;
mod error;
mod expand;
mod retrieval;
mod search;
mod template;
mod types;

pub mod prelude {
    pub use crate::{
        AttributeInfo, ContextualQueryAugmenter, Document, MultiQueryExpander, PromptTemplate,
        Query, QueryError, QueryErrorKind, RetrievalAugmentationAdvisor, SearchRequest,
        SearchRequestBuilder, StructuredQueryAdvisor, VectorStore,
    };
}

pub use augment::ContextualQueryAugmenter;
pub use error::{QueryError, QueryErrorKind};
pub use expand::MultiQueryExpander;
pub use retrieval::{
    AttributeInfo, NO_FILTER, RETRIEVED_DOCUMENTS_KEY, RetrievalAugmentationAdvisor,
    StructuredQueryAdvisor,
};
pub use search::{DEFAULT_TOP_K, SearchRequest, SearchRequestBuilder, VectorStore};
pub use template::PromptTemplate;
pub use types::{Document, Query};
