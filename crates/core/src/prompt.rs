//! Prompt construction.
//!
//! Builds the system block (catalog, output schema, rules) and the user
//! block (the request) from a [`Catalog`]. Output is a pure function of its
//! inputs, so the same request always yields the same bytes.

use crate::catalog::{Catalog, CatalogEntry};
use crate::types::{GenerationRequest, PromptBlocks};
use std::fmt::Write;

/// Fewest content slides we ask for.
const DEFAULT_MIN_SLIDES: usize = 8;

/// Builds the two prompt blocks for one catalog.
#[derive(Debug, Clone)]
pub struct PromptBuilder<'a> {
    catalog: &'a Catalog,
    min_slides: usize,
    max_slides: usize,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder asking for between 8 slides and the whole catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            min_slides: DEFAULT_MIN_SLIDES.min(catalog.len()),
            max_slides: catalog.len(),
        }
    }

    /// Override the number of content slides the provider may select.
    pub fn with_slide_range(mut self, min: usize, max: usize) -> Self {
        self.max_slides = max.max(1);
        self.min_slides = min.clamp(1, self.max_slides);
        self
    }

    /// Build both blocks for `request`.
    pub fn build(&self, request: &GenerationRequest) -> PromptBlocks {
        PromptBlocks {
            system: self.system_prompt(),
            user: self.user_prompt(request),
        }
    }

    /// The system block: role, catalog, output schema, content rules.
    pub fn system_prompt(&self) -> String {
        let mut out = String::new();
        out.push_str(
            "You are a world-class business presentation content strategist and writer.\n\
             \n\
             Given a topic, company name, industry, and audience, you must:\n\
             1. DECIDE which slides to include. Pick only the ones that are relevant and valuable for this specific topic.\n\
             2. ORGANIZE the selected slides into logical sections.\n\
             3. GENERATE the content for every selected slide.\n\
             \n\
             ## Available slide types (pick from these)\n\n",
        );
        for entry in self.catalog.entries() {
            write_entry(&mut out, entry);
        }

        out.push_str("\n## Always-included slides (do NOT list these in selected_slides)\n\n");
        for entry in self.catalog.fixed_entries() {
            write_entry(&mut out, entry);
        }
        out.push_str(
            "  - **toc**: Auto-generated from your sections\n\
             \x20 - **section_divider**: Auto-inserted before each section\n",
        );

        out.push_str(
            "\n## Output JSON schema\n\
             \n\
             {\n\
             \x20 \"selected_slides\": [\"slide_type\", ...],\n\
             \x20 \"sections\": [\n\
             \x20   {\"title\": \"Section Title\", \"subtitle\": \"One-line description\", \"slides\": [\"slide_type\", ...]},\n\
             \x20   ...\n\
             \x20 ],\n\
             \x20 \"content\": {\n\
             \x20   \"<content key>\": <value>,\n\
             \x20   ...\n\
             \x20 }\n\
             }\n",
        );

        let _ = write!(
            out,
            "\n## CRITICAL rules\n\
             1. selected_slides must only contain slide type names from the catalog above.\n\
             2. Every slide in selected_slides must have ALL its content keys in the \"content\" object.\n\
             3. Every slide listed in a section must also appear in selected_slides.\n\
             4. Integer lists described as summing to 100 MUST sum to exactly 100.\n\
             5. Chart series \"values\" arrays must have one value per category.\n\
             6. Progress values must be floats between 0.0 and 1.0.\n\
             7. Respect the item counts and character limits given for each key.\n\
             8. Invent realistic, plausible data that fits the topic. Be specific, not generic.\n\
             9. Output ONLY the JSON object: no markdown fences, no commentary.\n\
             10. Select at least {} and at most {} slides (not counting the always-included ones).\n\
             11. Give every selected slide a title that fits the topic.\n",
            self.min_slides, self.max_slides
        );
        out
    }

    /// The user block. Empty optional values are left out.
    pub fn user_prompt(&self, request: &GenerationRequest) -> String {
        let mut parts = vec![
            format!("Topic: {}", request.topic.trim()),
            format!("Company: {}", request.company.trim()),
        ];
        let optional = [
            ("Industry", &request.industry),
            ("Target audience", &request.audience),
            ("Tone", &request.tone),
            ("Additional context", &request.additional_context),
        ];
        for (label, value) in optional {
            let value = value.trim();
            if !value.is_empty() {
                parts.push(format!("{label}: {value}"));
            }
        }
        parts.push(
            "\nDecide which slides are most relevant, organize them into sections, \
             and generate all content."
                .to_string(),
        );
        parts.join("\n")
    }
}

fn write_entry(out: &mut String, entry: &CatalogEntry) {
    let _ = writeln!(out, "  - **{}**: {}", entry.id(), entry.description());
    out.push_str("    Content keys:\n");
    for field in entry.fields() {
        let _ = writeln!(
            out,
            "      {} ({}): {}",
            field.key(),
            field.shape().describe(),
            field.description()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest::new("Cloud migration strategy")
            .unwrap()
            .with_company("Globex")
            .with_audience("Board of directors")
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let catalog = Catalog::builtin();
        let builder = PromptBuilder::new(&catalog);
        assert_eq!(builder.build(&request()), builder.build(&request()));
    }

    #[test]
    fn test_system_prompt_lists_every_entry_and_field() {
        let catalog = Catalog::builtin();
        let system = PromptBuilder::new(&catalog).system_prompt();
        for entry in catalog.entries().iter().chain(catalog.fixed_entries()) {
            assert!(system.contains(&format!("**{}**", entry.id())), "missing {}", entry.id());
            for field in entry.fields() {
                assert!(system.contains(&format!("      {} (", field.key())));
            }
        }
        assert!(system.contains("\"selected_slides\""));
        assert!(system.contains("\"subtitle\""));
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let catalog = Catalog::builtin();
        let system = PromptBuilder::new(&catalog).system_prompt();
        let positions: Vec<usize> = catalog
            .entries()
            .iter()
            .filter_map(|e| system.find(&format!("**{}**", e.id())))
            .collect();
        assert_eq!(positions.len(), catalog.len());
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_user_prompt_omits_empty_fields() {
        let catalog = Catalog::builtin();
        let user = PromptBuilder::new(&catalog).user_prompt(&request());
        assert!(user.starts_with("Topic: Cloud migration strategy\nCompany: Globex\n"));
        assert!(user.contains("Target audience: Board of directors"));
        assert!(user.contains("Tone: professional"));
        assert!(!user.contains("Industry:"));
        assert!(!user.contains("Additional context:"));
    }

    #[test]
    fn test_slide_range() {
        let catalog = Catalog::builtin();
        let system = PromptBuilder::new(&catalog)
            .with_slide_range(5, 12)
            .system_prompt();
        assert!(system.contains("at least 5 and at most 12 slides"));
    }
}
