//! Research note scaffolding.
//!
//! [`NoteScaffolder::create_note`] turns a topic and a free-text label into a
//! fresh Markdown note under `research/<topic>/<date>/`, copied from the
//! topic's `TEMPLATE.md` with its time placeholders filled in.

pub mod scaffold;
pub mod slug;
pub mod template;
pub mod types;

use std::path::PathBuf;

pub use scaffold::{NoteScaffolder, ScaffoldOptions};
pub use slug::normalize_slug;
pub use types::{NoteLayout, Topic};

/// Errors produced while scaffolding a note.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("unknown topic '{topic}'; valid topics: {}", Topic::valid_names())]
    InvalidTopic { topic: String },

    #[error("slug '{input}' is empty after normalization")]
    EmptySlug { input: String },

    #[error("template not found: {}", path.display())]
    TemplateMissing { path: PathBuf },

    #[error("refusing to overwrite existing file: {}", path.display())]
    NoteAlreadyExists { path: PathBuf },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl NoteError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
