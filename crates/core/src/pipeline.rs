//! End-to-end generation: prompt, provider call, repair, validation.

use crate::catalog::Catalog;
use crate::error::{ProviderError, Result};
use crate::prompt::PromptBuilder;
use crate::repair::ResponseRepairer;
use crate::types::{GenerationRequest, GenerationResult, PromptBlocks, RawResponse};
use crate::validate::{SchemaValidator, ValidationReport};

/// A text-generation backend: one prompt in, one completion out.
pub trait TextGenerator {
    fn generate(&self, prompt: &PromptBlocks) -> std::result::Result<RawResponse, ProviderError>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, prompt: &PromptBlocks) -> std::result::Result<RawResponse, ProviderError> {
        (**self).generate(prompt)
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn generate(&self, prompt: &PromptBlocks) -> std::result::Result<RawResponse, ProviderError> {
        (**self).generate(prompt)
    }
}

/// Generates validated deck content from a request.
pub struct ContentGenerator<'a, G> {
    catalog: &'a Catalog,
    generator: G,
    prompts: PromptBuilder<'a>,
    repairer: ResponseRepairer,
}

impl<'a, G: TextGenerator> ContentGenerator<'a, G> {
    pub fn new(catalog: &'a Catalog, generator: G) -> Self {
        Self {
            catalog,
            generator,
            prompts: PromptBuilder::new(catalog),
            repairer: ResponseRepairer::default(),
        }
    }

    /// Use a custom prompt builder (e.g. a different slide range).
    pub fn with_prompts(mut self, prompts: PromptBuilder<'a>) -> Self {
        self.prompts = prompts;
        self
    }

    /// Use a custom repairer.
    pub fn with_repairer(mut self, repairer: ResponseRepairer) -> Self {
        self.repairer = repairer;
        self
    }

    /// Generate deck content for `request`.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        self.generate_with_report(request).map(|(result, _)| result)
    }

    /// Generate deck content, also returning what validation changed.
    pub fn generate_with_report(
        &self,
        request: &GenerationRequest,
    ) -> Result<(GenerationResult, ValidationReport)> {
        // Re-check the topic in case the request was built by hand.
        GenerationRequest::new(request.topic.clone())?;

        let prompt = self.prompts.build(request);
        log::info!("Requesting deck content for topic '{}'", request.topic);
        let response = self.generator.generate(&prompt)?;
        if response.truncated {
            log::warn!(
                "Response from {} hit the output limit; repairing what arrived",
                response.model
            );
        }

        let document = self.repairer.repair_to_value(&response.text)?;
        let (result, report) = SchemaValidator::new(self.catalog).validate_with_report(document)?;
        log::info!(
            "Validated {} slides in {} sections",
            result.selected_slides.len(),
            result.sections.len()
        );
        Ok((result, report))
    }

    /// Repair and validate a caller-supplied document, without a provider.
    pub fn from_document(&self, text: &str) -> Result<(GenerationResult, ValidationReport)> {
        from_document(self.catalog, &self.repairer, text)
    }
}

/// Repair and validate `text` against `catalog`. The document may be a full
/// `{selected_slides, sections, content}` object or bare content.
pub fn from_document(
    catalog: &Catalog,
    repairer: &ResponseRepairer,
    text: &str,
) -> Result<(GenerationResult, ValidationReport)> {
    let document = repairer.repair_to_value(text)?;
    let validated = SchemaValidator::new(catalog).validate_content_document(document)?;
    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidationError};
    use std::cell::{Cell, RefCell};

    /// In-memory generator returning a canned response.
    struct Canned {
        reply: std::result::Result<RawResponse, ProviderError>,
        calls: Cell<usize>,
        last_prompt: RefCell<Option<PromptBlocks>>,
    }

    impl Canned {
        fn ok(text: &str) -> Self {
            Self::with(Ok(RawResponse::new(text, "canned-model")))
        }

        fn with(reply: std::result::Result<RawResponse, ProviderError>) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
                last_prompt: RefCell::new(None),
            }
        }
    }

    impl TextGenerator for Canned {
        fn generate(&self, prompt: &PromptBlocks) -> std::result::Result<RawResponse, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_prompt.borrow_mut() = Some(prompt.clone());
            self.reply.clone()
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("Quarterly business review")
            .unwrap()
            .with_company("Initech")
    }

    #[test]
    fn test_generate_repairs_and_validates() {
        let catalog = Catalog::builtin();
        let generator = Canned::ok(
            "<think>pick slides</think>```json\n{\"selected_slides\": [\"kpi_dashboard\", \"nonexistent_type\",], \
             \"sections\": [{\"title\": \"Results\", \"slides\": [\"kpi_dashboard\"]}], \
             \"content\": {\"kpi_title\": \"Q4\", \"kpis\": $6.2B, \"cover_title\": \"Initech Q4\"}}\n```",
        );
        let (result, report) = ContentGenerator::new(&catalog, &generator)
            .generate_with_report(&request())
            .unwrap();

        assert_eq!(generator.calls.get(), 1);
        assert_eq!(result.selected_slides, vec!["kpi_dashboard"]);
        assert_eq!(result.content["kpi_title"], "Q4");
        assert_eq!(result.content["cover_title"], "Initech Q4");
        assert_eq!(
            result.content["kpis"],
            catalog.field("kpis").map(|f| f.default().clone()).unwrap()
        );
        assert_eq!(report.unknown_slides, vec!["nonexistent_type"]);
        assert_eq!(report.rejected, vec!["kpis"]);
    }

    #[test]
    fn test_prompt_reaches_generator() {
        let catalog = Catalog::builtin();
        let generator = Canned::ok(r#"{"selected_slides": ["key_facts"]}"#);
        ContentGenerator::new(&catalog, &generator)
            .generate(&request())
            .unwrap();
        let prompt = generator.last_prompt.borrow().clone().unwrap();
        assert_eq!(prompt, PromptBuilder::new(&catalog).build(&request()));
    }

    #[test]
    fn test_provider_error_stops_pipeline() {
        let catalog = Catalog::builtin();
        let generator = Canned::with(Err(ProviderError::Network("connection refused".to_string())));
        let err = ContentGenerator::new(&catalog, &generator)
            .generate(&request())
            .unwrap_err();
        assert!(matches!(err, Error::Provider(ProviderError::Network(_))));
    }

    #[test]
    fn test_unrepairable_response_is_repair_error() {
        let catalog = Catalog::builtin();
        let generator = Canned::ok("I'm sorry, I can't help with that.");
        let err = ContentGenerator::new(&catalog, &generator)
            .generate(&request())
            .unwrap_err();
        assert!(matches!(err, Error::Repair(_)));
    }

    #[test]
    fn test_empty_selection_is_validation_error() {
        let catalog = Catalog::builtin();
        let generator = Canned::ok(r#"{"selected_slides": [], "sections": [], "content": {}}"#);
        let err = ContentGenerator::new(&catalog, Box::new(generator))
            .generate(&request())
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptySelection)));
    }

    #[test]
    fn test_truncated_response_is_still_repaired() {
        let catalog = Catalog::builtin();
        let generator = Canned::with(Ok(RawResponse::new(
            r#"{"selected_slides": ["key_facts"], "content": {}}"#,
            "canned-model",
        )
        .with_truncated(true)));
        let result = ContentGenerator::new(&catalog, &generator)
            .generate(&request())
            .unwrap();
        assert_eq!(result.selected_slides, vec!["key_facts"]);
    }

    #[test]
    fn test_blank_topic_is_rejected_before_generation() {
        let catalog = Catalog::builtin();
        let generator = Canned::ok("{}");
        let mut req = request();
        req.topic = " ".to_string();
        let err = ContentGenerator::new(&catalog, &generator)
            .generate(&req)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert_eq!(generator.calls.get(), 0);
    }

    #[test]
    fn test_from_document_accepts_bare_content() {
        let catalog = Catalog::builtin();
        let generator = Canned::ok("{}");
        let (result, _) = ContentGenerator::new(&catalog, &generator)
            .from_document("{\"key_facts_title\": \"By the numbers\",}")
            .unwrap();
        assert_eq!(result.selected_slides, vec!["key_facts"]);
        assert_eq!(result.content["key_facts_title"], "By the numbers");
        assert_eq!(generator.calls.get(), 0);
    }
}
