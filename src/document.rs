//! Whole-file load and save

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::error::Error;
use crate::reader::LineReader;
use crate::section::{ParseMode, Section};

/// An INI file: sections in the order they were loaded or added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    sections: IndexMap<String, Section>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a file using [`ParseMode::Compatible`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::load_with(path, ParseMode::default())
    }

    pub fn load_with(path: impl AsRef<Path>, mode: ParseMode) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let document = Self::from_reader(BufReader::new(file), mode)?;
        debug!(
            path = %path.display(),
            sections = document.len(),
            "loaded document"
        );
        Ok(document)
    }

    /// Parse a document from any line stream.
    ///
    /// Lines outside a section body that are not headers (top-level
    /// comments, blank separators, fields dropped after an early stop) are
    /// skipped.
    pub fn from_reader<R: BufRead>(reader: R, mode: ParseMode) -> Result<Self, Error> {
        let mut lines = LineReader::new(reader);
        let mut document = Self::new();

        while let Some(line) = lines.next_line()? {
            let Some(name) = section_header(&line) else {
                continue;
            };
            trace!(name, "section header");
            document.add_section(name).parse(&mut lines, mode)?;
        }

        Ok(document)
    }

    /// Create an empty section named `name` and return it for filling.
    ///
    /// An existing section with the same name is replaced, keeping its
    /// position in the file.
    pub fn add_section(&mut self, name: impl Into<String>) -> &mut Section {
        let name = name.into();
        match self.sections.entry(name) {
            indexmap::map::Entry::Occupied(mut entry) => {
                debug!(name = entry.key().as_str(), "replacing existing section");
                entry.insert(Section::new());
                entry.into_mut()
            }
            indexmap::map::Entry::Vacant(entry) => entry.insert(Section::new()),
        }
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Remove a section, keeping the order of the others.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Render the document exactly as [`Document::save`] writes it.
    ///
    /// Sections are separated by one blank line. With `tabbed`, each field
    /// line starts with a tab.
    pub fn to_ini_string(&self, tabbed: bool) -> String {
        let mut out = String::new();

        for (i, (name, section)) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");

            for (key, field) in section.iter() {
                if tabbed {
                    out.push('\t');
                }
                out.push_str(key);
                out.push('=');
                out.push_str(field.as_str());
                out.push('\n');
            }
        }

        out
    }

    /// Replace the contents of `path` with the rendered document.
    ///
    /// The text goes to a temporary file next to `path`, which is then
    /// renamed over it. The temporary file is created owner-only (0600 on
    /// Unix), so the saved file is too.
    pub fn save(&self, path: impl AsRef<Path>, tabbed: bool) -> Result<(), Error> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let content = self.to_ini_string(tabbed);
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;

        debug!(
            path = %path.display(),
            sections = self.len(),
            bytes = content.len(),
            "saved document"
        );
        Ok(())
    }
}

impl FromStr for Document {
    type Err = Error;

    /// Parse with [`ParseMode::Compatible`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes(), ParseMode::default())
    }
}

/// Name inside a `[name]` header line, if `line` is one.
fn section_header(line: &str) -> Option<&str> {
    line.trim().strip_prefix('[')?.strip_suffix(']')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(doc: &Document) -> Vec<&str> {
        doc.section_names().collect()
    }

    // ===========================================
    // Header detection
    // ===========================================

    #[test]
    fn test_section_header() {
        assert_eq!(section_header("[server]\n"), Some("server"));
        assert_eq!(section_header("  [a b]  \r\n"), Some("a b"));
        assert_eq!(section_header("[]"), Some(""));
        assert_eq!(section_header("[open"), None);
        assert_eq!(section_header("key=[x]"), None);
    }

    // ===========================================
    // Load
    // ===========================================

    #[test]
    fn test_load_end_to_end() {
        let doc: Document = "[server]\nhost=localhost\ndebug=true\n".parse().unwrap();

        assert_eq!(names(&doc), vec!["server"]);
        let server = doc.section("server").unwrap();
        assert_eq!(server.len(), 2);
        assert_eq!(server.get_string("host", ""), "localhost");
        assert!(server.get_bool("debug", false));
    }

    #[test]
    fn test_load_ignores_top_level_lines() {
        let doc: Document = "; header comment\nstray=value\n\n[a]\nk=v\n".parse().unwrap();

        assert_eq!(names(&doc), vec!["a"]);
        assert_eq!(doc.section("a").unwrap().len(), 1);
    }

    #[test]
    fn test_load_multiple_sections_with_blank_separator() {
        let doc: Document = "[one]\na=x\n\n[two]\nb=y\n\n\n[three]\n".parse().unwrap();

        assert_eq!(names(&doc), vec!["one", "two", "three"]);
        assert!(doc.section("three").unwrap().is_empty());
    }

    #[test]
    fn test_load_lines_after_blank_are_dropped() {
        let doc: Document = "[a]\nk=v\n\nlost=x\n[b]\nm=n\n".parse().unwrap();

        let a = doc.section("a").unwrap();
        assert_eq!(a.len(), 1);
        assert!(!a.contains_key("lost"));
        assert_eq!(doc.section("b").unwrap().get_string("m", ""), "n");
    }

    #[test]
    fn test_load_bool_then_key_drops_rest_of_section() {
        let doc: Document = "[flags]\nenabled=yes\nname=after\n[next]\nk=v\n"
            .parse()
            .unwrap();

        let flags = doc.section("flags").unwrap();
        assert_eq!(flags.keys().collect::<Vec<_>>(), vec!["enabled"]);
        assert!(flags.get_bool("enabled", false));
        // The following header is still found
        assert_eq!(doc.section("next").unwrap().get_string("k", ""), "v");
    }

    #[test]
    fn test_load_bool_then_key_lenient() {
        let doc =
            Document::from_reader("[flags]\nenabled=yes\nname=after\n".as_bytes(), ParseMode::Lenient)
                .unwrap();

        let flags = doc.section("flags").unwrap();
        assert_eq!(flags.keys().collect::<Vec<_>>(), vec!["enabled", "name"]);
    }

    #[test]
    fn test_load_bool_inference() {
        let doc: Document = "[a]\nenabled=off\n[b]\nenabled=maybe\n".parse().unwrap();

        assert!(!doc.section("a").unwrap().get_bool("enabled", true));
        let b = doc.section("b").unwrap();
        assert!(!b.get_bool("enabled", false));
        assert_eq!(b.get_string("enabled", ""), "maybe");
    }

    #[test]
    fn test_load_duplicate_section_last_wins() {
        let doc: Document = "[a]\nx=1x\n[b]\ny=2y\n[a]\nz=3z\n".parse().unwrap();

        assert_eq!(names(&doc), vec!["a", "b"]);
        let a = doc.section("a").unwrap();
        assert!(!a.contains_key("x"));
        assert_eq!(a.get_string("z", ""), "3z");
    }

    #[test]
    fn test_load_crlf_and_missing_final_newline() {
        // The unterminated last line is kept as a field; a strict
        // delimiter-terminated reader would drop it.
        let doc: Document = "[a]\r\nk=v\r\n[b]\r\nlast=value".parse().unwrap();

        assert_eq!(doc.section("a").unwrap().get_string("k", ""), "v");
        assert_eq!(doc.section("b").unwrap().get_string("last", ""), "value");
    }

    #[test]
    fn test_load_non_utf8_comment() {
        let doc = Document::from_reader(&b"; caf\xe9\n[a]\nk=v\n"[..], ParseMode::Compatible)
            .unwrap();

        assert_eq!(doc.section("a").unwrap().get_string("k", ""), "v");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = Document::load(dir.path().join("nope.ini"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    // ===========================================
    // Building
    // ===========================================

    #[test]
    fn test_add_section_order() {
        let mut doc = Document::new();
        for name in ["c", "a", "b"] {
            doc.add_section(name);
        }
        assert_eq!(names(&doc), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_add_section_replaces_in_place() {
        let mut doc = Document::new();
        doc.add_section("a").add_string("k", "v");
        doc.add_section("b");
        let replaced = doc.add_section("a");
        assert!(replaced.is_empty());

        assert_eq!(names(&doc), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_section() {
        let mut doc = Document::new();
        doc.add_section("a");
        doc.add_section("b");
        doc.add_section("c");

        assert!(doc.remove_section("b").is_some());
        assert_eq!(names(&doc), vec!["a", "c"]);
        assert!(!doc.contains_section("b"));
    }

    // ===========================================
    // Save
    // ===========================================

    #[test]
    fn test_render_plain_and_tabbed() {
        let mut doc = Document::new();
        let server = doc.add_section("server");
        server.add_string("host", "localhost");
        server.add_bool("debug", true);
        doc.add_section("limits").add_int("max", 10);

        assert_eq!(
            doc.to_ini_string(false),
            "[server]\nhost=localhost\ndebug=true\n\n[limits]\nmax=10\n"
        );
        assert_eq!(
            doc.to_ini_string(true),
            "[server]\n\thost=localhost\n\tdebug=true\n\n[limits]\n\tmax=10\n"
        );
    }

    #[test]
    fn test_render_empty_document() {
        assert_eq!(Document::new().to_ini_string(false), "");
    }

    #[test]
    fn test_comments_not_written_back() {
        let doc: Document = "[a]\n; comment\nk=v\n".parse().unwrap();
        assert_eq!(doc.to_ini_string(false), "[a]\nk=v\n");
    }

    #[test]
    fn test_bool_literals_normalized_on_save() {
        let doc: Document = "[a]\nflag=on\n".parse().unwrap();
        assert_eq!(doc.to_ini_string(false), "[a]\nflag=true\n");
    }

    #[test]
    fn test_save_replaces_file_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.ini");
        fs::write(&path, "old content that is much longer than the new one\n").unwrap();

        let mut doc = Document::new();
        doc.add_section("s").add_string("k", "v");
        doc.save(&path, false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[s]\nk=v\n");
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.ini");

        let mut doc = Document::new();
        let a = doc.add_section("alpha");
        a.add_string("name", "demo");
        a.add_string("path", "/tmp/x=y");
        a.add_bool("verbose", false);
        doc.add_section("beta").add_string("k", "v");
        doc.save(&path, false).unwrap();

        let loaded = Document::load(&path).unwrap();
        assert_eq!(names(&loaded), vec!["alpha", "beta"]);
        let a = loaded.section("alpha").unwrap();
        assert_eq!(a.keys().collect::<Vec<_>>(), vec!["name", "path", "verbose"]);
        assert_eq!(a.get_string("path", ""), "/tmp/x=y");
        assert!(!a.get_bool("verbose", true));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.ini");
        Document::new().save(&path, false).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("app.ini");

        let result = Document::new().save(&path, false);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
