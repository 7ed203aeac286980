use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Error;
use crate::field::classify;
use crate::section::ParseMode;

/// Settings for rewriting INI files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Indent field lines with a tab (default: false)
    pub tabbed: bool,
    /// Section scanning mode (default: compatible)
    pub mode: ParseMode,
    /// Extensions picked up when walking directories (default: ["ini"])
    pub extensions: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            tabbed: false,
            mode: ParseMode::Compatible,
            extensions: vec!["ini".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProblemKind {
    /// Comment line, never written back
    CommentDropped,
    /// Line not read into any section
    LineDropped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub line: usize,
    pub kind: ProblemKind,
}

#[derive(Debug)]
pub struct FormatResult {
    pub original: String,
    pub content: String,
    pub document: Document,
    pub problems: Vec<Problem>,
}

impl FormatResult {
    pub fn has_changes(&self) -> bool {
        self.original != self.content
    }

    /// Saving would lose comments or fields.
    pub fn drops_content(&self) -> bool {
        !self.problems.is_empty()
    }
}

/// Load `content` and render it back in canonical form.
pub fn format_content(content: &str, config: &FormatConfig) -> Result<FormatResult, Error> {
    let document = Document::from_reader(content.as_bytes(), config.mode)?;
    let rendered = document.to_ini_string(config.tabbed);
    let problems = dropped_lines(content, &document);

    Ok(FormatResult {
        original: content.to_string(),
        content: rendered,
        document,
        problems,
    })
}

/// Report source lines that did not make it into `document`.
///
/// A field line counts as kept when the section it sits under holds the
/// same key with the same canonical value.
pub fn dropped_lines(content: &str, document: &Document) -> Vec<Problem> {
    let mut problems = vec![];
    let mut current: Option<&str> = None;

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        let line_num = idx + 1;

        if trimmed.is_empty() {
            continue;
        }

        if let Some(name) = trimmed.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            current = Some(name);
            continue;
        }

        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            problems.push(Problem {
                line: line_num,
                kind: ProblemKind::CommentDropped,
            });
            continue;
        }

        let kept = current
            .and_then(|name| document.section(name))
            .zip(line.split_once('='))
            .is_some_and(|(section, (key, value))| {
                section
                    .get(key.trim())
                    .is_some_and(|field| field.as_str() == classify(value.trim()).as_str())
            });

        if !kept {
            problems.push(Problem {
                line: line_num,
                kind: ProblemKind::LineDropped,
            });
        }
    }

    problems
}
