//! CLI tool for generating presentation deck content with an LLM.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use deck_core::{
    Catalog, ContentGenerator, Error, GenerationRequest, GenerationResult, ProviderError,
    ResponseRepairer, ValidationReport,
};
use deck_provider::{Backend, ProviderClient, ProviderConfig};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Generate structured slide content for business presentations.
#[derive(Parser, Debug)]
#[command(name = "deck-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the provider for a deck and validate it
    Generate(GenerateArgs),

    /// Repair and validate an existing JSON document
    Validate {
        /// JSON document (full deck or bare content)
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write the full template deck with placeholder content
    Template {
        /// Company name shown on the cover
        #[arg(short, long, default_value = deck_core::types::DEFAULT_COMPANY)]
        company: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List catalog entries and their fields
    Catalog,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output file (default: derived from the command)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Subject of the deck
    #[arg(short, long)]
    topic: String,

    /// Presenting company
    #[arg(short, long, default_value = deck_core::types::DEFAULT_COMPANY)]
    company: String,

    /// Intended audience
    #[arg(short, long, default_value = "")]
    audience: String,

    /// Tone or style hint
    #[arg(long, default_value = deck_core::types::DEFAULT_TONE)]
    tone: String,

    /// Industry the company operates in
    #[arg(short, long, default_value = "")]
    industry: String,

    /// Additional free-text context
    #[arg(long, default_value = "")]
    context: String,

    /// Backend: minimax or openai
    #[arg(long, env = "DECKGEN_PROVIDER", default_value = "minimax")]
    provider: String,

    /// Model name (default: the backend's default model)
    #[arg(long, env = "DECKGEN_MODEL")]
    model: Option<String>,

    /// Endpoint root (default: the backend's public endpoint)
    #[arg(long, env = "DECKGEN_BASE_URL")]
    base_url: Option<String>,

    /// API key for the backend
    #[arg(long, env = "DECKGEN_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Maximum output tokens
    #[arg(long, env = "DECKGEN_MAX_TOKENS", default_value_t = deck_provider::config::DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Sampling temperature
    #[arg(long, env = "DECKGEN_TEMPERATURE", default_value_t = deck_provider::config::DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Request timeout in seconds
    #[arg(long, env = "DECKGEN_TIMEOUT_SECS", default_value_t = 120)]
    timeout_secs: u64,

    /// Extra attempts after a provider or repair failure
    #[arg(long, default_value_t = 0)]
    retries: u32,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let catalog = Catalog::builtin();

    match cli.command {
        Command::Generate(args) => {
            let (result, report) = generate(&catalog, &args)?;
            if cli.verbose {
                print_report(&report);
            }
            emit(&result, &args.output, Path::new("deck_content.json"), cli.verbose)
        }
        Command::Validate { input, output } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let (result, report) =
                deck_core::pipeline::from_document(&catalog, &ResponseRepairer::default(), &text)
                    .with_context(|| format!("Failed to validate {}", input.display()))?;
            if cli.verbose {
                print_report(&report);
            }
            emit(&result, &output, &validated_path(&input), cli.verbose)
        }
        Command::Template { company, output } => {
            let result = GenerationResult::template(&catalog, &company);
            emit(&result, &output, Path::new("template_content.json"), cli.verbose)
        }
        Command::Catalog => {
            print_catalog(&catalog);
            Ok(())
        }
    }
}

/// Build the provider from the arguments and run the pipeline, retrying
/// provider and repair failures with exponential backoff.
fn generate(catalog: &Catalog, args: &GenerateArgs) -> Result<(GenerationResult, ValidationReport)> {
    let backend: Backend = args.provider.parse().map_err(anyhow::Error::msg)?;
    let mut config = ProviderConfig::new(backend, args.api_key.clone())
        .with_max_tokens(args.max_tokens)
        .with_temperature(args.temperature)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url);
    }

    let client = ProviderClient::new(config).context("Failed to set up provider")?;
    let request = GenerationRequest::new(args.topic.as_str())?
        .with_company(args.company.as_str())
        .with_audience(args.audience.as_str())
        .with_tone(args.tone.as_str())
        .with_industry(args.industry.as_str())
        .with_additional_context(args.context.as_str());
    let generator = ContentGenerator::new(catalog, &client);

    let mut attempt = 0;
    loop {
        match generator.generate_with_report(&request) {
            Ok(generated) => return Ok(generated),
            Err(e) if attempt < args.retries && is_retryable(&e) => {
                let delay = backoff(attempt, &e);
                log::warn!(
                    "Attempt {} failed ({}), retrying in {}s",
                    attempt + 1,
                    e,
                    delay.as_secs()
                );
                std::thread::sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e).context("Deck generation failed"),
        }
    }
}

fn is_retryable(err: &Error) -> bool {
    matches!(err, Error::Provider(_) | Error::Repair(_))
}

/// 1s, 2s, 4s... unless the backend said how long to wait.
fn backoff(attempt: u32, err: &Error) -> Duration {
    match err {
        Error::Provider(ProviderError::RateLimit {
            retry_after_secs: Some(secs),
        }) => Duration::from_secs(*secs),
        _ => Duration::from_secs(1u64 << attempt.min(6)),
    }
}

/// Write the result as pretty JSON to stdout or a file.
fn emit(result: &GenerationResult, args: &OutputArgs, default_path: &Path, verbose: bool) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("Failed to serialize deck content")?;
    if args.print {
        println!("{}", json);
        return Ok(());
    }

    let path = args.output.as_deref().unwrap_or(default_path);
    write_output(path, &format!("{}\n", json))?;
    if verbose {
        eprintln!(
            "Written to: {} ({} slides in {} sections, {} rendered)",
            path.display(),
            result.selected_slides.len(),
            result.sections.len(),
            result.total_slide_count()
        );
    }
    Ok(())
}

/// `deck.json` validates to `deck.validated.json` next to it.
fn validated_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let filename = format!("{}.validated.json", stem);
    match input.parent() {
        Some(parent) => parent.join(filename),
        None => PathBuf::from(filename),
    }
}

fn print_report(report: &ValidationReport) {
    let lists = [
        ("Unknown slides", &report.unknown_slides),
        ("Dropped sections", &report.dropped_sections),
        ("Flattened", &report.flattened),
        ("Alias collisions", &report.alias_collisions),
        ("Coerced", &report.coerced),
        ("Rejected", &report.rejected),
        ("Defaulted", &report.defaulted),
        ("Stripped", &report.stripped),
    ];
    for (label, keys) in lists {
        if !keys.is_empty() {
            eprintln!("  {}: {}", label, keys.join(", "));
        }
    }
    for (alias, canonical) in &report.aliased {
        eprintln!("  Renamed {} -> {}", alias, canonical);
    }
}

fn print_catalog(catalog: &Catalog) {
    for entry in catalog.entries() {
        println!("{} [{}]: {}", entry.id(), entry.group(), entry.description());
        for field in entry.fields() {
            println!("    {} ({})", field.key(), field.shape().describe());
        }
    }
    for entry in catalog.fixed_entries() {
        println!("{} [always included]: {}", entry.id(), entry.description());
        for field in entry.fields() {
            println!("    {} ({})", field.key(), field.shape().describe());
        }
    }
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::RepairError;

    #[test]
    fn test_validated_path() {
        assert_eq!(
            validated_path(Path::new("decks/q4.json")),
            PathBuf::from("decks/q4.validated.json")
        );
    }

    #[test]
    fn test_retry_policy() {
        let repair = Error::Repair(RepairError {
            reason: "eof".to_string(),
            offending_snippet: String::new(),
        });
        assert!(is_retryable(&repair));
        assert!(!is_retryable(&Error::Validation(
            deck_core::ValidationError::EmptySelection
        )));
        assert_eq!(backoff(0, &repair), Duration::from_secs(1));
        assert_eq!(backoff(2, &repair), Duration::from_secs(4));

        let limited = Error::Provider(ProviderError::RateLimit {
            retry_after_secs: Some(9),
        });
        assert_eq!(backoff(0, &limited), Duration::from_secs(9));
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "deck-gen",
            "generate",
            "--topic",
            "Series B pitch",
            "--api-key",
            "k",
            "--provider",
            "openai",
            "--print",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.topic, "Series B pitch");
        assert_eq!(args.company, "Acme Corp");
        assert_eq!(args.max_tokens, 12_000);
        assert!(args.output.print);
    }
}
