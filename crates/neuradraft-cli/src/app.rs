//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use neuradraft_ast::{DocType, Document, OutputFormat};
use neuradraft_core::render::{stage_artifacts, HtmlRenderer, PlainTextRenderer};
use neuradraft_core::{
    base_file_name, build_document, document_title, ModelProvider, Renderer, Session,
};
use neuradraft_ooxml::DocxRenderer;
use neuradraft_pdf::PdfRenderer;

use crate::config::Settings;
use crate::provider::GeminiClient;
use crate::wizard::Wizard;

#[derive(Parser)]
#[command(name = "neuradraft")]
#[command(author, version, about = "Draft documents with a language model", long_about = None)]
struct Cli {
    /// Configuration file (default: ./neuradraft.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive wizard: topic, outline approval, generation, delivery
    New {
        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render an existing markdown file into every configured format
    Render {
        /// Input markdown file
        input: PathBuf,

        /// Topic used for the title and file names (default: file stem)
        #[arg(long)]
        topic: Option<String>,

        /// Document type
        #[arg(short = 't', long = "type", default_value = "article")]
        doc_type: DocType,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Formats to render, comma separated (overrides config)
        #[arg(short, long, value_delimiter = ',')]
        formats: Vec<OutputFormat>,
    },

    /// Print a generated outline for a topic
    Outline {
        /// Document topic
        topic: String,

        /// Document type
        #[arg(short = 't', long = "type", default_value = "article")]
        doc_type: DocType,
    },
}

/// Options for [`render_command`]
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub topic: Option<String>,
    pub doc_type: DocType,
    pub output: Option<PathBuf>,
    pub formats: Vec<OutputFormat>,
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::New { output } => {
            new_command(&settings, output.as_deref())?;
        }
        Commands::Render {
            input,
            topic,
            doc_type,
            output,
            formats,
        } => {
            let options = RenderOptions {
                topic,
                doc_type,
                output,
                formats,
            };
            render_command(&input, &options, &settings)?;
        }
        Commands::Outline { topic, doc_type } => {
            outline_command(&topic, doc_type, &settings)?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber; `log` records are forwarded to it
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(verbose, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// `--verbose` forces debug, otherwise a non-empty `RUST_LOG` wins over `info`
fn filter_directives(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        _ if verbose => "debug".to_string(),
        Some(env) if !env.is_empty() => env.to_string(),
        _ => "info".to_string(),
    }
}

/// Build the renderers for `formats`, in that order
pub fn build_renderers(settings: &Settings, formats: &[OutputFormat]) -> Result<Vec<Box<dyn Renderer>>> {
    let mut renderers: Vec<Box<dyn Renderer>> = Vec::with_capacity(formats.len());
    for format in formats {
        let renderer: Box<dyn Renderer> = match format {
            OutputFormat::Pdf if settings.pdf.fonts.is_empty() => Box::new(PdfRenderer::new()),
            OutputFormat::Pdf => Box::new(
                PdfRenderer::with_font_files(&settings.pdf.fonts).context("Failed to load PDF fonts")?,
            ),
            OutputFormat::Docx => match &settings.docx.template {
                Some(path) => Box::new(DocxRenderer::with_template_file(path).with_context(|| {
                    format!("Failed to load DOCX template: {}", path.display())
                })?),
                None => Box::new(DocxRenderer::new()),
            },
            OutputFormat::Txt => Box::new(PlainTextRenderer::new()),
            OutputFormat::Html => Box::new(HtmlRenderer::new()),
        };
        renderers.push(renderer);
    }
    Ok(renderers)
}

/// Render `doc` with every renderer and write the results into `dir`
///
/// Per-format failures are reported on `out`; the call only fails when
/// nothing could be delivered.
pub fn deliver(
    doc: &Document,
    renderers: &[Box<dyn Renderer>],
    base_name: &str,
    dir: &Path,
    out: &mut dyn Write,
) -> Result<Vec<PathBuf>> {
    let delivery = stage_artifacts(doc, renderers, base_name).context("Failed to stage artifacts")?;
    let written = delivery
        .write_all(dir)
        .with_context(|| format!("Failed to write output to {}", dir.display()))?;

    for (artifact, path) in delivery.artifacts.iter().zip(&written) {
        writeln!(out, "  Created {}: {}", artifact.format.display_name(), path.display())?;
    }
    for (format, error) in &delivery.failures {
        writeln!(out, "  Failed  {}: {}", format.display_name(), error)?;
    }

    if written.is_empty() {
        anyhow::bail!("No format could be rendered");
    }
    Ok(written)
}

/// Execute the render command
pub fn render_command(input: &Path, options: &RenderOptions, settings: &Settings) -> Result<Vec<PathBuf>> {
    println!("neuradraft v{}", neuradraft_core::VERSION);
    println!("Rendering: {}", input.display());

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let markdown = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let topic = match &options.topic {
        Some(topic) => topic.clone(),
        None => input
            .file_stem()
            .map(|s| s.to_string_lossy().replace(['_', '-'], " "))
            .unwrap_or_default(),
    };
    if topic.trim().is_empty() {
        anyhow::bail!("A topic is required to name the output; pass --topic");
    }

    let doc = build_document(document_title(options.doc_type, &topic), &markdown);
    println!("  {} sections", doc.len());

    let formats = if options.formats.is_empty() {
        &settings.output.formats
    } else {
        &options.formats
    };
    let renderers = build_renderers(settings, formats)?;
    let dir = options.output.as_deref().unwrap_or(&settings.output.directory);
    let base_name = base_file_name(options.doc_type, &topic, chrono::Local::now().naive_local());

    let written = deliver(&doc, &renderers, &base_name, dir, &mut io::stdout())?;
    println!();
    println!("Render complete! {} of {} formats written", written.len(), formats.len());
    Ok(written)
}

/// Execute the outline command
pub fn outline_command(topic: &str, doc_type: DocType, settings: &Settings) -> Result<()> {
    let provider = GeminiClient::from_settings(&settings.provider)?;
    let mut session = Session::new();
    let outline = crate::wizard::with_spinner("Generating outline...", || {
        session
            .submit_topic(&provider as &dyn ModelProvider, topic, doc_type)
            .map(str::to_string)
    })?;
    println!("{}", outline);
    Ok(())
}

/// Execute the interactive wizard
pub fn new_command(settings: &Settings, output: Option<&Path>) -> Result<()> {
    let provider = GeminiClient::from_settings(&settings.provider)?;
    let renderers = build_renderers(settings, &settings.output.formats)?;
    let dir = output.unwrap_or(&settings.output.directory).to_path_buf();

    let stdin = io::stdin();
    let mut wizard = Wizard::new(stdin.lock(), io::stdout(), &provider, renderers, dir);
    let written = wizard.run()?;
    println!("{} file(s) written", written.len());
    Ok(())
}
