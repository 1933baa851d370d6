//! Document wizard session
//!
//! The wizard is an explicit state machine. Every transition is a method
//! call made on behalf of the user; a method called in the wrong state
//! returns [`SessionError::InvalidTransition`] and leaves the session
//! untouched.
//!
//! ```text
//! AwaitTopic/Reset --submit_topic--> AwaitOutlineApproval
//! AwaitOutlineApproval --back_to_topic--> AwaitTopic
//! AwaitOutlineApproval --approve_outline--> Generating
//! Generating --generate_content--> Ready
//! any --reset--> Reset
//! ```

use std::fmt;

use neuradraft_ast::{DocType, Document};
use thiserror::Error;

use crate::filename::document_title;
use crate::prompts::{content_prompt, outline_prompt, CONTENT_SYSTEM_PROMPT, OUTLINE_SYSTEM_PROMPT};
use crate::provider::{ModelProvider, ProviderError};
use crate::splitter::split_into_sections;

/// Wizard states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardState {
    /// Waiting for a topic and document type
    #[default]
    AwaitTopic,
    /// Outline generated, waiting for approval and feedback
    AwaitOutlineApproval,
    /// Outline approved, content generation pending
    Generating,
    /// Document generated and ready to render
    Ready,
    /// Previous document discarded, waiting for a new topic
    Reset,
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardState::AwaitTopic => "awaiting topic",
            WizardState::AwaitOutlineApproval => "awaiting outline approval",
            WizardState::Generating => "generating",
            WizardState::Ready => "ready",
            WizardState::Reset => "reset",
        };
        f.write_str(name)
    }
}

/// Errors raised by session transitions
#[derive(Debug, Error)]
pub enum SessionError {
    /// Topic was empty or whitespace
    #[error("Topic must not be empty")]
    EmptyTopic,

    /// Action not allowed in the current state
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: WizardState,
    },

    /// The model provider failed; the session stays in its current state
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Which step produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeKind {
    Outline,
    Content,
}

/// One model response recorded in the session history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub kind: ExchangeKind,
    pub text: String,
}

/// Wizard session context
#[derive(Debug, Default)]
pub struct Session {
    state: WizardState,
    topic: String,
    doc_type: DocType,
    outline: Option<String>,
    feedback: String,
    document: Option<Document>,
    history: Vec<Exchange>,
}

impl Session {
    /// Create a session waiting for a topic
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Topic of the current document (empty after reset)
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Document type of the current document
    pub fn doc_type(&self) -> DocType {
        self.doc_type
    }

    /// Generated outline, if any
    pub fn outline(&self) -> Option<&str> {
        self.outline.as_deref()
    }

    /// Feedback given on the outline
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Generated document, available in [`WizardState::Ready`]
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// All model responses so far, oldest first
    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    fn require(&self, action: &'static str, allowed: &[WizardState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    fn call(
        &mut self,
        provider: &dyn ModelProvider,
        kind: ExchangeKind,
        system: &str,
        user: &str,
    ) -> Result<String> {
        log::debug!("Requesting {:?} from {}", kind, provider.name());
        let text = provider.generate(system, user)?;
        if text.trim().is_empty() {
            return Err(ProviderError::Empty.into());
        }
        self.history.push(Exchange {
            kind,
            text: text.clone(),
        });
        Ok(text)
    }

    /// Submit a topic and generate its outline
    pub fn submit_topic(
        &mut self,
        provider: &dyn ModelProvider,
        topic: &str,
        doc_type: DocType,
    ) -> Result<&str> {
        self.require("submit a topic", &[WizardState::AwaitTopic, WizardState::Reset])?;
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SessionError::EmptyTopic);
        }

        let prompt = outline_prompt(topic, doc_type);
        let outline = self.call(provider, ExchangeKind::Outline, OUTLINE_SYSTEM_PROMPT, &prompt)?;

        self.topic = topic.to_string();
        self.doc_type = doc_type;
        self.state = WizardState::AwaitOutlineApproval;
        Ok(self.outline.insert(outline).as_str())
    }

    /// Return to topic entry, keeping the topic for editing
    pub fn back_to_topic(&mut self) -> Result<()> {
        self.require("go back", &[WizardState::AwaitOutlineApproval])?;
        self.outline = None;
        self.state = WizardState::AwaitTopic;
        Ok(())
    }

    /// Approve the outline with optional feedback
    pub fn approve_outline(&mut self, feedback: &str) -> Result<()> {
        self.require("approve the outline", &[WizardState::AwaitOutlineApproval])?;
        self.feedback = feedback.trim().to_string();
        self.state = WizardState::Generating;
        Ok(())
    }

    /// Generate the full document from the approved outline
    pub fn generate_content(&mut self, provider: &dyn ModelProvider) -> Result<&Document> {
        self.require("generate content", &[WizardState::Generating])?;
        let outline = self.outline.clone().unwrap_or_default();
        let prompt = content_prompt(&self.topic, &outline, &self.feedback);
        let content = self.call(provider, ExchangeKind::Content, CONTENT_SYSTEM_PROMPT, &prompt)?;

        let document = Document::new(
            document_title(self.doc_type, &self.topic),
            split_into_sections(&content),
        );
        log::info!("Generated document with {} sections", document.len());

        self.state = WizardState::Ready;
        let document: &Document = self.document.insert(document);
        Ok(document)
    }

    /// Discard the current document and start over
    ///
    /// The history is kept.
    pub fn reset(&mut self) {
        self.topic.clear();
        self.doc_type = DocType::default();
        self.outline = None;
        self.feedback.clear();
        self.document = None;
        self.state = WizardState::Reset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Provider returning canned responses in order
    struct Scripted {
        responses: RefCell<Vec<std::result::Result<String, ProviderError>>>,
        prompts: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(responses: Vec<std::result::Result<String, ProviderError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl ModelProvider for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn generate(&self, _system: &str, user: &str) -> std::result::Result<String, ProviderError> {
            self.prompts.borrow_mut().push(user.to_string());
            self.responses.borrow_mut().remove(0)
        }
    }

    fn ok(s: &str) -> std::result::Result<String, ProviderError> {
        Ok(s.to_string())
    }

    #[test]
    fn test_full_flow() {
        let provider = Scripted::new(vec![
            ok("1. Intro\n2. Body"),
            ok("## Intro\nHello\n## Body\nWorld"),
        ]);
        let mut session = Session::new();

        let outline = session
            .submit_topic(&provider, "  Rust  ", DocType::Guide)
            .unwrap()
            .to_string();
        assert_eq!(outline, "1. Intro\n2. Body");
        assert_eq!(session.state(), WizardState::AwaitOutlineApproval);
        assert_eq!(session.topic(), "Rust");

        session.approve_outline("more examples").unwrap();
        assert_eq!(session.state(), WizardState::Generating);

        let doc = session.generate_content(&provider).unwrap();
        assert_eq!(doc.title, "Guide: Rust");
        assert_eq!(doc.len(), 2);
        assert_eq!(session.state(), WizardState::Ready);

        let prompts = provider.prompts.borrow();
        assert!(prompts[1].contains("more examples"));
        assert!(prompts[1].contains("1. Intro\n2. Body"));

        let kinds: Vec<_> = session.history().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ExchangeKind::Outline, ExchangeKind::Content]);
    }

    #[test]
    fn test_empty_topic_rejected() {
        let provider = Scripted::new(vec![]);
        let mut session = Session::new();
        let err = session.submit_topic(&provider, "   ", DocType::Article).unwrap_err();
        assert!(matches!(err, SessionError::EmptyTopic));
        assert_eq!(session.state(), WizardState::AwaitTopic);
    }

    #[test]
    fn test_provider_failure_halts_step() {
        let provider = Scripted::new(vec![Err(ProviderError::Request("offline".into()))]);
        let mut session = Session::new();
        let err = session.submit_topic(&provider, "X", DocType::Article).unwrap_err();
        assert!(matches!(err, SessionError::Provider(ProviderError::Request(_))));
        assert_eq!(session.state(), WizardState::AwaitTopic);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_blank_response_is_error() {
        let provider = Scripted::new(vec![ok("  \n ")]);
        let mut session = Session::new();
        let err = session.submit_topic(&provider, "X", DocType::Article).unwrap_err();
        assert!(matches!(err, SessionError::Provider(ProviderError::Empty)));
    }

    #[test]
    fn test_content_failure_stays_generating() {
        let provider = Scripted::new(vec![ok("outline"), Err(ProviderError::Empty)]);
        let mut session = Session::new();
        session.submit_topic(&provider, "X", DocType::Report).unwrap();
        session.approve_outline("").unwrap();
        assert!(session.generate_content(&provider).is_err());
        assert_eq!(session.state(), WizardState::Generating);
        assert!(session.document().is_none());
    }

    #[test]
    fn test_invalid_transitions() {
        let provider = Scripted::new(vec![]);
        let mut session = Session::new();
        assert!(matches!(
            session.approve_outline(""),
            Err(SessionError::InvalidTransition { .. })
        ));
        assert!(session.back_to_topic().is_err());
        assert!(session.generate_content(&provider).is_err());
        assert_eq!(session.state(), WizardState::AwaitTopic);
    }

    #[test]
    fn test_back_to_topic() {
        let provider = Scripted::new(vec![ok("outline")]);
        let mut session = Session::new();
        session.submit_topic(&provider, "X", DocType::Article).unwrap();
        session.back_to_topic().unwrap();
        assert_eq!(session.state(), WizardState::AwaitTopic);
        assert!(session.outline().is_none());
        assert_eq!(session.topic(), "X");
    }

    #[test]
    fn test_reset_keeps_history() {
        let provider = Scripted::new(vec![ok("outline"), ok("second outline")]);
        let mut session = Session::new();
        session.submit_topic(&provider, "X", DocType::Article).unwrap();
        session.reset();
        assert_eq!(session.state(), WizardState::Reset);
        assert_eq!(session.topic(), "");
        assert_eq!(session.history().len(), 1);

        session.submit_topic(&provider, "Y", DocType::Report).unwrap();
        assert_eq!(session.state(), WizardState::AwaitOutlineApproval);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = SessionError::InvalidTransition {
            action: "go back",
            state: WizardState::Ready,
        };
        assert_eq!(err.to_string(), "Cannot go back while ready");
    }
}
