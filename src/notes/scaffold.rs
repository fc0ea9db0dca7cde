//! Create-once note materialization.
//!
//! The pipeline is: validate topic -> normalize slug -> stamp the clock ->
//! resolve (or synthesize) the template -> create the date directory ->
//! exclusive-create the note file -> write the rendered template.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::template::{default_template, render};
use super::types::{NoteLayout, Stamp, Topic};
use super::{normalize_slug, NoteError};
use crate::config::WorkspaceConfig;

/// Name of the per-topic template file.
pub const TEMPLATE_FILE: &str = "TEMPLATE.md";

/// Policy knobs for note creation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaffoldOptions {
    pub layout: NoteLayout,
    /// Write a built-in skeleton to `TEMPLATE.md` instead of failing when it is absent.
    pub create_default_template_if_missing: bool,
}

impl From<&WorkspaceConfig> for ScaffoldOptions {
    fn from(config: &WorkspaceConfig) -> Self {
        Self {
            layout: config.layout,
            create_default_template_if_missing: config.create_default_template_if_missing,
        }
    }
}

/// Creates research notes under `<workspace>/research/`.
#[derive(Debug, Clone)]
pub struct NoteScaffolder {
    workspace: PathBuf,
    options: ScaffoldOptions,
}

impl NoteScaffolder {
    pub fn new(workspace: impl Into<PathBuf>, options: ScaffoldOptions) -> Self {
        Self {
            workspace: workspace.into(),
            options,
        }
    }

    /// `<workspace>/research/<topic>`
    pub fn topic_dir(&self, topic: Topic) -> PathBuf {
        self.workspace.join("research").join(topic.as_str())
    }

    /// `<workspace>/research/<topic>/TEMPLATE.md`
    pub fn template_path(&self, topic: Topic) -> PathBuf {
        self.topic_dir(topic).join(TEMPLATE_FILE)
    }

    /// Create a note stamped with the current UTC time.
    pub fn create_note(&self, topic: &str, slug: &str) -> Result<PathBuf, NoteError> {
        self.create_note_at(topic, slug, Utc::now())
    }

    /// Create a note stamped with `now`.
    ///
    /// Returns the absolute path of the new note. On error no note file is
    /// left behind, including when the write itself fails part way.
    pub fn create_note_at(
        &self,
        topic: &str,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<PathBuf, NoteError> {
        let topic: Topic = topic.parse().map_err(|_| NoteError::InvalidTopic {
            topic: topic.to_string(),
        })?;
        let slug = normalize_slug(slug)?;
        let stamp = Stamp::new(now);

        let template = self.load_template(topic)?;

        let out_dir = self.topic_dir(topic).join(&stamp.date);
        fs::create_dir_all(&out_dir).map_err(|e| {
            NoteError::io(format!("failed to create directory {}", out_dir.display()), e)
        })?;
        let out_dir = absolutize(&out_dir)?;
        let note_path = out_dir.join(self.options.layout.file_name(&stamp, &slug));

        let content = render(&template, &stamp);
        write_new(&note_path, &content)?;

        info!(topic = %topic, path = %note_path.display(), "research note created");
        Ok(note_path)
    }

    /// Read the topic template, synthesizing the default one first if policy allows.
    fn load_template(&self, topic: Topic) -> Result<String, NoteError> {
        let path = self.template_path(topic);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if !self.options.create_default_template_if_missing {
                    return Err(NoteError::TemplateMissing { path });
                }
                let text = default_template(topic);
                write_default_template(&path, &text)?;
                Ok(text)
            }
            Err(e) => Err(NoteError::io(
                format!("failed to read template {}", path.display()),
                e,
            )),
        }
    }
}

/// Persist the default template. Never replaces a template that appeared meanwhile.
fn write_default_template(path: &Path, text: &str) -> Result<(), NoteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            NoteError::io(format!("failed to create directory {}", parent.display()), e)
        })?;
    }
    match create_exclusive(path, |file| file.write_all(text.as_bytes())) {
        Ok(()) => {
            info!(path = %path.display(), "default template created");
            Ok(())
        }
        Err(CreateError::Exists) => {
            debug!(path = %path.display(), "template appeared concurrently, keeping it");
            Ok(())
        }
        Err(CreateError::Open(e)) => Err(NoteError::io(
            format!("failed to create template {}", path.display()),
            e,
        )),
        Err(CreateError::Write(e)) => Err(NoteError::io(
            format!("failed to write template {}", path.display()),
            e,
        )),
    }
}

/// Exclusive-create `path` and write `content` into it.
fn write_new(path: &Path, content: &str) -> Result<(), NoteError> {
    create_exclusive(path, |file| file.write_all(content.as_bytes())).map_err(|e| match e {
        CreateError::Exists => NoteError::NoteAlreadyExists {
            path: path.to_path_buf(),
        },
        CreateError::Open(e) => {
            NoteError::io(format!("failed to create note {}", path.display()), e)
        }
        CreateError::Write(e) => {
            NoteError::io(format!("failed to write note {}", path.display()), e)
        }
    })
}

#[derive(Debug)]
enum CreateError {
    Exists,
    Open(io::Error),
    Write(io::Error),
}

/// Create `path` with O_EXCL and run `fill` on it. If `fill` or the final
/// sync fails, the file is removed again so a retry starts from nothing.
fn create_exclusive<F>(path: &Path, fill: F) -> Result<(), CreateError>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Err(CreateError::Exists),
        Err(e) => return Err(CreateError::Open(e)),
    };

    let written = fill(&mut file).and_then(|()| file.sync_all());
    drop(file);

    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "failed to remove partial file");
        }
        return Err(CreateError::Write(e));
    }
    Ok(())
}

fn absolutize(path: &Path) -> Result<PathBuf, NoteError> {
    path.canonicalize().map_err(|e| {
        NoteError::io(format!("failed to resolve {}", path.display()), e)
    })
}
