//! Business Services
//!
//! This module contains the services that talk to the content API:
//!
//! - `BlockTreeBuilder` - Recursive block forest construction with list merging
//! - `ArticleService` - Article discovery and document assembly
//!
//! Services coordinate between the content client, the cache store and the
//! models. Every failure they surface is a `NotionServiceError`.

pub mod article_service;
pub mod block_tree;
pub mod error;


pub use article_service::{ArticleQuery, ArticleService};
pub use block_tree::BlockTreeBuilder;
pub use error::NotionServiceError;
