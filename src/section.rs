//! Ordered field collection and the per-section parse loop

use std::io::{self, BufRead};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::field::{classify, Field, Kind};
use crate::reader::LineReader;

/// How a section body is scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// A boolean field ends the section: lines after it, up to the next
    /// header, are dropped. Matches files written for the classic reader.
    #[default]
    Compatible,
    /// Keep scanning after boolean fields.
    Lenient,
}

/// Fields of one `[section]`, in insertion order.
///
/// Adding an existing key replaces its field but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    fields: IndexMap<String, Field>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume `key=value` lines until a blank line, a header or the end of
    /// the stream. The blank line or header is left unread.
    pub(crate) fn parse<R: BufRead>(
        &mut self,
        lines: &mut LineReader<R>,
        mode: ParseMode,
    ) -> io::Result<()> {
        loop {
            let Some(next) = lines.peek_line()? else {
                return Ok(());
            };

            if next.starts_with('\n') || next.starts_with("\r\n") {
                return Ok(());
            }

            // A header may be indented by one byte
            if next.bytes().take(2).any(|b| b == b'[') {
                return Ok(());
            }

            let Some(line) = lines.next_line()? else {
                return Ok(());
            };

            if line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                debug!(line = line.trim_end(), "line without '=' ends section");
                return Ok(());
            };

            let key = key.trim();
            let field = classify(value.trim());
            trace!(key, value = field.as_str(), kind = ?field.kind(), "field");

            let is_bool = field.kind() == Kind::Bool;
            self.set(key, field);

            if is_bool && mode == ParseMode::Compatible {
                debug!(key, "boolean field ends section");
                return Ok(());
            }
        }
    }

    /// Store `field` under `key`, returning the field it replaced.
    pub fn set(&mut self, key: impl Into<String>, field: Field) -> Option<Field> {
        self.fields.insert(key.into(), field)
    }

    pub fn add_bool(&mut self, key: impl Into<String>, value: bool) {
        self.set(key, Field::bool(value));
    }

    pub fn add_int(&mut self, key: impl Into<String>, value: i64) {
        self.set(key, Field::int(value));
    }

    pub fn add_float(&mut self, key: impl Into<String>, value: f64) {
        self.set(key, Field::float(value));
    }

    pub fn add_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set(key, Field::string(value));
    }

    /// Boolean value of `key`, or `default` when it is missing or was not
    /// stored as a boolean.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.fields
            .get(key)
            .and_then(Field::as_bool)
            .unwrap_or(default)
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.fields
            .get(key)
            .and_then(Field::as_int)
            .unwrap_or(default)
    }

    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        self.fields
            .get(key)
            .and_then(Field::as_float)
            .unwrap_or(default)
    }

    /// String form of `key` whatever its kind, or `default` when missing.
    pub fn get_string<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.fields.get(key).map_or(default, Field::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Remove `key`, keeping the order of the remaining fields.
    pub fn remove(&mut self, key: &str) -> Option<Field> {
        self.fields.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
