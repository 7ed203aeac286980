//! Single-value operations behind `inifile get`, `set` and `sections`

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{classify, dropped_lines, Document, Error, FormatConfig, ParseMode};

/// String form of `key` in `section`, if both exist.
pub fn get_value(
    path: &Path,
    section: &str,
    key: &str,
    mode: ParseMode,
) -> Result<Option<String>, Error> {
    let document = Document::load_with(path, mode)?;
    Ok(document
        .section(section)
        .and_then(|s| s.get(key))
        .map(|field| field.as_str().to_string()))
}

/// Store `value` (type inferred) under `section`/`key` and save.
///
/// A missing file or section is created. The existing file is read in
/// [`ParseMode::Lenient`] so fields after a boolean survive the rewrite;
/// if comments or other lines would still be lost, the file is left alone
/// and [`Error::DropsContent`] is returned unless `allow_drop` is set.
pub fn set_value(
    path: &Path,
    section: &str,
    key: &str,
    value: &str,
    config: &FormatConfig,
    allow_drop: bool,
) -> Result<(), Error> {
    let mut document = if path.exists() {
        let content = String::from_utf8_lossy(&fs::read(path)?).into_owned();
        let document = Document::from_reader(content.as_bytes(), ParseMode::Lenient)?;

        let dropped: Vec<usize> = dropped_lines(&content, &document)
            .iter()
            .map(|p| p.line)
            .collect();
        if !dropped.is_empty() {
            if !allow_drop {
                return Err(Error::DropsContent { lines: dropped });
            }
            debug!(path = %path.display(), lines = ?dropped, "dropping content on rewrite");
        }
        document
    } else {
        debug!(path = %path.display(), "creating new file");
        Document::new()
    };

    if !document.contains_section(section) {
        document.add_section(section);
    }
    if let Some(target) = document.section_mut(section) {
        target.set(key, classify(value.trim()));
    }

    document.save(path, config.tabbed)
}

pub fn list_sections(path: &Path, mode: ParseMode) -> Result<Vec<String>, Error> {
    let document = Document::load_with(path, mode)?;
    Ok(document.section_names().map(str::to_string).collect())
}
