//! Template generation for `inifile init`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::CONFIG_FILE_NAME;

/// Template inifile.toml with documentation
pub const INIFILE_TOML_TEMPLATE: &str = r#"# inifile.toml - Configuration for the inifile formatter
#
# `inifile fmt` rewrites INI files in canonical form:
# - One `key=value` per line, whitespace around keys and values trimmed
# - Boolean literals (yes/on/1/...) written as true/false
# - One blank line between sections
# - Comments are not kept
#
# Uncomment and modify the settings below as needed.

[format]
# Indent field lines with a tab character.
# When unset, `indent_style = tab` in .editorconfig ([*] or [*.ini]) enables it.
# Default: false
# tabbed = false

# Keep reading a section after a boolean field.
# The classic reader stops at the first boolean and drops the lines
# after it; enable this for files written by other tools.
# Default: false
# lenient = false

# File extensions picked up when a directory is given.
# Files named explicitly on the command line are always formatted.
# Default: ["ini"]
# extensions = ["ini"]
"#;

/// Write the template into `dir` (or the current directory if None).
///
/// Fails with `AlreadyExists` rather than overwriting.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(
        || PathBuf::from(CONFIG_FILE_NAME),
        |d| d.join(CONFIG_FILE_NAME),
    );

    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .and_then(|mut file| io::Write::write_all(&mut file, INIFILE_TOML_TEMPLATE.as_bytes()))
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{CONFIG_FILE_NAME} already exists"),
            ),
            _ => e,
        })?;

    Ok(path)
}

pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
