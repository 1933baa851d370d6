//! neuradraft CLI - Command-line interface library
//!
//! This library provides the CLI functionality for neuradraft:
//! - New: interactive wizard from topic to rendered files
//! - Render: turn an existing markdown file into every output format
//! - Outline: print a generated outline
//!
//! # Binary Usage
//!
//! ```bash
//! # Start the wizard
//! GEMINI_API_KEY=... neuradraft new
//!
//! # Render a markdown draft to TXT and HTML only
//! neuradraft render draft.md --type report --formats txt,html
//!
//! # Outline only
//! neuradraft outline "Urban beekeeping" --type guide
//! ```

pub mod app;
pub mod config;
pub mod provider;
pub mod wizard;

// Re-export main entry point and types
pub use app::{
    build_renderers, deliver, new_command, outline_command, render_command, run_cli,
    RenderOptions,
};
pub use config::Settings;
pub use provider::GeminiClient;
pub use wizard::Wizard;
