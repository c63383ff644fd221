//! Domain types flowing through the generation pipeline.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Company name used when the caller does not provide one.
pub const DEFAULT_COMPANY: &str = "Acme Corp";

/// Tone hint used when the caller does not provide one.
pub const DEFAULT_TONE: &str = "professional";

/// What the caller wants a deck about. Built once per generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Subject of the deck. Never blank.
    pub topic: String,

    /// Company the deck is presented by.
    pub company: String,

    /// Industry the company operates in (optional).
    pub industry: String,

    /// Intended audience (optional).
    pub audience: String,

    /// Tone or style hint for the writing.
    pub tone: String,

    /// Free-text context appended to the request (optional).
    pub additional_context: String,
}

impl GenerationRequest {
    /// Create a request for the given topic with default company and tone.
    ///
    /// Fails with [`Error::InvalidRequest`] when the topic is blank.
    pub fn new(topic: impl Into<String>) -> Result<Self> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(Error::InvalidRequest("topic must not be empty".to_string()));
        }

        Ok(Self {
            topic,
            company: DEFAULT_COMPANY.to_string(),
            industry: String::new(),
            audience: String::new(),
            tone: DEFAULT_TONE.to_string(),
            additional_context: String::new(),
        })
    }

    /// Set the presenting company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Set the industry.
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    /// Set the intended audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Set the tone hint.
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    /// Set additional free-text context.
    pub fn with_additional_context(mut self, context: impl Into<String>) -> Self {
        self.additional_context = context.into();
        self
    }
}

/// The two instruction blocks sent to a text-generation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBlocks {
    /// Catalog, output schema and content rules.
    pub system: String,

    /// The request itself: topic, company, audience, tone, context.
    pub user: String,
}

/// Opaque text returned by a provider, before any repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Completion text exactly as the provider returned it.
    pub text: String,

    /// Model that produced the completion, as reported by the backend.
    pub model: String,

    /// Whether the provider stopped because it hit the output limit.
    pub truncated: bool,
}

impl RawResponse {
    /// Create a complete (non-truncated) response.
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            truncated: false,
        }
    }

    /// Mark whether the completion was cut off at the output limit.
    pub fn with_truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }
}

/// A titled group of slides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading.
    pub title: String,

    /// One-line description shown under the heading.
    #[serde(default)]
    pub subtitle: String,

    /// Catalog identifiers of the slides in this section, in order.
    pub slides: Vec<String>,
}

impl Section {
    /// Create a section with an empty subtitle.
    pub fn new(title: impl Into<String>, slides: Vec<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
            slides,
        }
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }
}

/// Validated deck content, ready for a renderer.
///
/// Every identifier in `selected_slides` and `sections` exists in the
/// catalog it was validated against, and `content` holds exactly the fields
/// those slides (plus the fixed cover and closing slides) declare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Selected catalog identifiers, in deck order.
    pub selected_slides: Vec<String>,

    /// Selected slides grouped into titled sections.
    pub sections: Vec<Section>,

    /// Flat mapping from field key to value.
    pub content: Map<String, Value>,
}

impl GenerationResult {
    /// Assemble the full template deck from the catalog's placeholder content.
    ///
    /// Every selectable entry is included in catalog order, grouped into one
    /// section per entry group, and every declared field takes its default.
    /// No provider is involved, so the result is fully deterministic.
    pub fn template(catalog: &Catalog, company: &str) -> Self {
        let selected_slides: Vec<String> =
            catalog.entries().iter().map(|e| e.id().to_string()).collect();

        let mut sections: Vec<Section> = Vec::new();
        for entry in catalog.entries() {
            match sections.iter_mut().find(|s| s.title == entry.group()) {
                Some(section) => section.slides.push(entry.id().to_string()),
                None => sections.push(Section::new(entry.group(), vec![entry.id().to_string()])),
            }
        }

        let mut content = Map::new();
        for entry in catalog.fixed_entries().iter().chain(catalog.entries()) {
            for field in entry.fields() {
                content
                    .entry(field.key().to_string())
                    .or_insert_with(|| field.default().clone());
            }
        }
        if !company.trim().is_empty() {
            content.insert("cover_title".to_string(), Value::String(company.to_string()));
        }

        Self {
            selected_slides,
            sections,
            content,
        }
    }

    /// Number of rendered slides: cover, table of contents, one divider per
    /// section, the content slides, and the closing slide.
    pub fn total_slide_count(&self) -> usize {
        2 + self.sections.len() + self.selected_slides.len() + 1
    }
}
