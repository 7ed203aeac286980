//! `.editorconfig` as a source of indentation defaults

use std::path::{Path, PathBuf};

use super::file::find_file_upward;
use crate::{Document, Error, ParseMode};

/// Sections consulted, later ones override earlier ones.
const SECTIONS: [&str; 2] = ["*", "*.ini"];

/// Settings read from .editorconfig
#[derive(Debug, Default, PartialEq)]
pub struct EditorConfigSettings {
    pub indent_style: Option<String>,
}

impl EditorConfigSettings {
    /// `Some(true)` for `indent_style = tab`, `Some(false)` for any other style.
    pub fn tabbed(&self) -> Option<bool> {
        self.indent_style.as_deref().map(|style| style == "tab")
    }
}

pub fn find_editorconfig(start_dir: &Path) -> Option<PathBuf> {
    find_file_upward(start_dir, ".editorconfig", false)
}

/// Read `indent_style` from the `[*]` and `[*.ini]` sections.
///
/// The file goes through the regular INI reader in lenient mode, so a
/// blank line inside a section still ends it.
pub fn parse_editorconfig(path: &Path) -> Result<EditorConfigSettings, Error> {
    let document = Document::load_with(path, ParseMode::Lenient)?;

    let indent_style = SECTIONS
        .iter()
        .filter_map(|name| document.section(name))
        .filter_map(|section| section.get("indent_style"))
        .map(|field| field.as_str().to_lowercase())
        .last();

    Ok(EditorConfigSettings { indent_style })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_editorconfig(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(".editorconfig");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_find_editorconfig_in_parent() {
        let parent = TempDir::new().unwrap();
        let path = write_editorconfig(&parent, "root = true\n");

        let child = parent.path().join("subdir");
        fs::create_dir(&child).unwrap();

        assert_eq!(find_editorconfig(&child), Some(path));
    }

    #[test]
    fn test_parse_global_section() {
        let dir = TempDir::new().unwrap();
        let path = write_editorconfig(
            &dir,
            "root = true\n\n[*]\ntrim_trailing_whitespace = true\nindent_style = Tab\n",
        );

        let settings = parse_editorconfig(&path).unwrap();
        assert_eq!(settings.indent_style.as_deref(), Some("tab"));
        assert_eq!(settings.tabbed(), Some(true));
    }

    #[test]
    fn test_ini_section_overrides_global() {
        let dir = TempDir::new().unwrap();
        let path = write_editorconfig(
            &dir,
            "[*]\nindent_style = tab\n\n[*.ini]\nindent_style = space\n",
        );

        let settings = parse_editorconfig(&path).unwrap();
        assert_eq!(settings.tabbed(), Some(false));
    }

    #[test]
    fn test_unrelated_sections_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_editorconfig(&dir, "[*.md]\nindent_style = tab\n");

        let settings = parse_editorconfig(&path).unwrap();
        assert_eq!(settings, EditorConfigSettings::default());
        assert_eq!(settings.tabbed(), None);
    }
}
