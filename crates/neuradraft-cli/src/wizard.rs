//! Interactive document wizard
//!
//! Drives a [`Session`] from line-based input: topic and type, outline
//! review, feedback, generation, preview and delivery. Provider failures are shown
//! and the wizard stays on the step that failed.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use neuradraft_ast::{DocType, Document, HeadingLevel};
use neuradraft_core::render::PlainTextRenderer;
use neuradraft_core::{base_file_name, normalize, ModelProvider, Renderer, Session};

use crate::app::deliver;

/// Run `f` while a spinner shows `message` on stderr
///
/// The spinner is hidden when stderr is not a terminal.
pub fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/", "-"])
        .template("{spinner} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = f();
    spinner.finish_and_clear();
    result
}

/// Line-driven wizard over any input and output
pub struct Wizard<'a, R, W> {
    input: R,
    output: W,
    provider: &'a dyn ModelProvider,
    renderers: Vec<Box<dyn Renderer>>,
    directory: PathBuf,
    session: Session,
}

impl<'a, R: BufRead, W: Write> Wizard<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        provider: &'a dyn ModelProvider,
        renderers: Vec<Box<dyn Renderer>>,
        directory: PathBuf,
    ) -> Self {
        Self {
            input,
            output,
            provider,
            renderers,
            directory,
            session: Session::new(),
        }
    }

    /// The session driven by this wizard
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Print `question` and read one trimmed line; `None` at end of input
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Yes/no question; empty input picks `default`
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        Ok(match self.ask(question)? {
            None => false,
            Some(answer) if answer.is_empty() => default,
            Some(answer) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
        })
    }

    /// Ask for a topic, offering the previous one as default
    fn ask_topic(&mut self) -> Result<Option<String>> {
        loop {
            let previous = self.session.topic().to_string();
            let question = if previous.is_empty() {
                "Topic: ".to_string()
            } else {
                format!("Topic [{}]: ", previous)
            };
            let Some(answer) = self.ask(&question)? else {
                return Ok(None);
            };
            if !answer.is_empty() {
                return Ok(Some(answer));
            }
            if !previous.is_empty() {
                return Ok(Some(previous));
            }
            writeln!(self.output, "Please enter a topic.")?;
        }
    }

    fn ask_doc_type(&mut self) -> Result<Option<DocType>> {
        writeln!(self.output, "Document type:")?;
        for (i, doc_type) in DocType::all().iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, doc_type)?;
        }
        loop {
            let Some(answer) = self.ask("Choice [1]: ")? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(DocType::default()));
            }
            let by_number = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| DocType::all().get(i).copied());
            match by_number.or_else(|| answer.parse().ok()) {
                Some(doc_type) => return Ok(Some(doc_type)),
                None => writeln!(self.output, "Unknown document type: {}", answer)?,
            }
        }
    }

    /// Steps up to an approved outline; `None` when the user quits
    fn outline_stage(&mut self) -> Result<Option<()>> {
        loop {
            let Some(topic) = self.ask_topic()? else {
                return Ok(None);
            };
            let Some(doc_type) = self.ask_doc_type()? else {
                return Ok(None);
            };

            let session = &mut self.session;
            let provider = self.provider;
            let outline = with_spinner("Generating outline...", || {
                session
                    .submit_topic(provider, &topic, doc_type)
                    .map(str::to_string)
            });
            let outline = match outline {
                Ok(outline) => outline,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    continue;
                }
            };

            writeln!(self.output, "\n{}\n", outline.trim_end())?;
            match self.ask("[a]pprove, [b]ack to topic, [q]uit: ")? {
                None => return Ok(None),
                Some(choice) if choice.eq_ignore_ascii_case("q") => return Ok(None),
                Some(choice) if choice.eq_ignore_ascii_case("b") => {
                    self.session.back_to_topic()?;
                    continue;
                }
                Some(_) => {}
            }

            let feedback = self
                .ask("Feedback for the writer (Enter to skip): ")?
                .unwrap_or_default();
            self.session.approve_outline(&feedback)?;
            return Ok(Some(()));
        }
    }

    /// Generate content, offering a manual retry on failure
    fn generate_stage(&mut self) -> Result<Option<Document>> {
        loop {
            let session = &mut self.session;
            let provider = self.provider;
            let result = with_spinner("Writing document...", || {
                session.generate_content(provider).map(Document::clone)
            });
            match result {
                Ok(doc) => return Ok(Some(doc)),
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    if !self.confirm("Retry? [Y/n]: ", true)? {
                        return Ok(None);
                    }
                }
            }
        }
    }

    /// List the generated sections and optionally show the whole text
    fn preview_stage(&mut self, doc: &Document) -> Result<()> {
        writeln!(self.output, "\n{} ({} sections)", doc.title, doc.sections.len())?;
        for section in &doc.sections {
            let indent = match section.level {
                HeadingLevel::H2 => "  ",
                HeadingLevel::H3 => "    ",
            };
            writeln!(self.output, "{}{}", indent, normalize(&section.heading))?;
        }
        if self.confirm("View full content? [y/N]: ", false)? {
            writeln!(self.output, "\n{}", PlainTextRenderer::render_string(doc))?;
        }
        Ok(())
    }

    /// Run until the user quits; returns every written file
    pub fn run(&mut self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        loop {
            if self.outline_stage()?.is_none() {
                break;
            }

            if let Some(doc) = self.generate_stage()? {
                self.preview_stage(&doc)?;
                let base_name = base_file_name(
                    self.session.doc_type(),
                    self.session.topic(),
                    chrono::Local::now().naive_local(),
                );
                writeln!(self.output, "Rendering {}...", doc.title)?;
                match deliver(&doc, &self.renderers, &base_name, &self.directory, &mut self.output) {
                    Ok(paths) => written.extend(paths),
                    Err(e) => writeln!(self.output, "Error: {:#}", e)?,
                }
            }

            if !self.confirm("Create another document? [y/N]: ", false)? {
                break;
            }
            self.session.reset();
        }

        Ok(written)
    }
}
