//! Core domain types, slide catalog, response repair and validation
//! for LLM-generated presentation content.

mod builtin;
pub mod catalog;
pub mod coerce;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod repair;
pub mod types;
pub mod validate;

pub use catalog::{Catalog, CatalogBuilder, CatalogEntry, Column, FieldShape, FieldSpec, Len};
pub use error::{Error, ProviderError, RepairError, Result, ValidationError};
pub use pipeline::{ContentGenerator, TextGenerator};
pub use prompt::PromptBuilder;
pub use repair::{RepairStep, ResponseRepairer};
pub use types::{GenerationRequest, GenerationResult, PromptBlocks, RawResponse, Section};
pub use validate::{SchemaValidator, ValidationReport};
