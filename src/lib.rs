//! Order-preserving INI reader and writer.
//!
//! A [`Document`] holds [`Section`]s in the order they were read or added,
//! and each section holds [`Field`]s the same way, so a file loaded and
//! saved again keeps its layout:
//!
//! ```
//! use inifile::Document;
//!
//! let doc: Document = "[server]\nhost=localhost\ndebug=true\n".parse().unwrap();
//! let server = doc.section("server").unwrap();
//! assert_eq!(server.get_string("host", ""), "localhost");
//! assert!(server.get_bool("debug", false));
//! assert_eq!(doc.to_ini_string(true), "[server]\n\thost=localhost\n\tdebug=true\n");
//! ```
//!
//! The rest of the crate backs the `inifile` command-line formatter.

pub mod colors;
pub mod commands;
pub mod config;
mod document;
mod error;
mod field;
pub mod format;
mod output;
pub mod progress;
mod reader;
mod section;
pub mod walker;

pub use colors::{should_use_colors, Colors};
pub use commands::{get_value, list_sections, set_value};
pub use config::{
    find_config_file, find_editorconfig, generate_init_file, load_config, merge_format_config,
    parse_editorconfig, CliFormatOptions, ConfigError, EditorConfigSettings, FormatSection,
    InifileToml, INIFILE_TOML_TEMPLATE,
};
pub use document::Document;
pub use error::Error;
pub use field::{bool_literal, classify, Field, Kind, Value};
pub use format::{dropped_lines, format_content, FormatConfig, FormatResult, Problem, ProblemKind};
pub use output::{print_diff, Config, OutputContext, OutputMode, RunResult};
pub use progress::ProgressReporter;
pub use section::{ParseMode, Section};
pub use walker::walk_paths;

use std::fs;
use std::io;
use std::path::Path;

const BINARY_CHECK_SIZE: usize = 8192;

/// Check if content is binary by looking for null bytes in first 8192 bytes
pub fn is_binary(content: &[u8]) -> bool {
    let check_len = content.len().min(BINARY_CHECK_SIZE);
    content[..check_len].contains(&0)
}

/// Format every INI file under `paths`.
pub fn run(paths: &[String], config: &Config, ctx: &OutputContext) -> io::Result<RunResult> {
    let mut result = RunResult::default();

    let files: Vec<_> = walk_paths(paths, &config.format.extensions).collect::<io::Result<_>>()?;
    let progress = ProgressReporter::new(files.len() as u64, ctx.show_progress);

    for path in &files {
        if let Err(e) = process_file(path, config, &mut result, ctx) {
            if ctx.mode != OutputMode::Quiet {
                eprintln!("Error processing {}: {e}", path.display());
            }
        }

        let name = path.file_name().map(|n| n.to_string_lossy());
        progress.file_done(name.as_deref().unwrap_or_default());
    }

    progress.finish();

    output::print_summary(&result, config, ctx);

    Ok(result)
}

fn process_file(
    path: &Path,
    config: &Config,
    result: &mut RunResult,
    ctx: &OutputContext,
) -> io::Result<()> {
    let bytes = fs::read(path)?;

    if is_binary(&bytes) {
        if ctx.verbose {
            output::print_skipped(path, "binary", ctx);
        }
        return Ok(());
    }

    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(_) => {
            if ctx.verbose {
                output::print_skipped(path, "non-UTF-8", ctx);
            }
            return Ok(());
        }
    };

    let formatted = format_content(&content, &config.format).map_err(io::Error::other)?;

    if !formatted.has_changes() {
        if ctx.verbose {
            output::print_checked(path, ctx);
        }
        return Ok(());
    }

    result.warnings += formatted.problems.len();

    if config.check_only {
        result.files_with_problems += 1;
        output::print_check_result(path, &formatted, ctx);
    } else if formatted.drops_content() && !config.allow_drop {
        result.files_with_problems += 1;
        output::print_refused(path, &formatted, ctx);
    } else {
        formatted
            .document
            .save(path, config.format.tabbed)
            .map_err(io::Error::other)?;
        result.files_formatted += 1;
        output::print_fix_result(path, &formatted, ctx);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet_ctx() -> OutputContext {
        OutputContext::new(OutputMode::Quiet, false, false, false)
    }

    fn config(check_only: bool) -> Config {
        Config {
            check_only,
            output_mode: OutputMode::Quiet,
            allow_drop: false,
            format: FormatConfig::default(),
        }
    }

    // ===========================================
    // Binary Detection
    // ===========================================

    #[test]
    fn test_detect_binary_with_null_byte() {
        assert!(is_binary(b"[a]\x00k=v"));
    }

    #[test]
    fn test_non_binary_text() {
        assert!(!is_binary(b"[a]\nk=v\n"));
    }

    #[test]
    fn test_binary_null_after_8192_bytes_not_detected() {
        let mut content = vec![b'a'; 9000];
        content.push(0);
        assert!(!is_binary(&content));
    }

    // ===========================================
    // Run
    // ===========================================

    #[test]
    fn test_run_formats_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.ini");
        fs::write(&path, "[a]\n k = v \n").unwrap();

        let paths = vec![dir.path().to_string_lossy().to_string()];
        let result = run(&paths, &config(false), &quiet_ctx()).unwrap();

        assert_eq!(result.files_formatted, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[a]\nk=v\n");
    }

    #[test]
    fn test_run_check_only_leaves_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.ini");
        fs::write(&path, "[a]\nflag=yes\nafter=x\n").unwrap();

        let paths = vec![path.to_string_lossy().to_string()];
        let result = run(&paths, &config(true), &quiet_ctx()).unwrap();

        assert!(result.has_problems());
        assert_eq!(result.warnings, 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[a]\nflag=yes\nafter=x\n"
        );
    }

    #[test]
    fn test_run_keeps_file_that_would_lose_comments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.ini");
        let original = "; credentials\n[db]\n# primary\nhost = x\n";
        fs::write(&path, original).unwrap();

        let paths = vec![path.to_string_lossy().to_string()];
        let result = run(&paths, &config(false), &quiet_ctx()).unwrap();

        assert!(result.has_problems());
        assert_eq!(result.files_formatted, 0);
        assert_eq!(result.warnings, 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);

        let allow = Config {
            allow_drop: true,
            ..config(false)
        };
        let result = run(&paths, &allow, &quiet_ctx()).unwrap();

        assert_eq!(result.files_formatted, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[db]\nhost=x\n");
    }

    #[test]
    fn test_run_skips_binary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.ini");
        fs::write(&path, b"[a]\x00").unwrap();

        let paths = vec![path.to_string_lossy().to_string()];
        let result = run(&paths, &config(false), &quiet_ctx()).unwrap();

        assert_eq!(result.files_formatted, 0);
        assert_eq!(fs::read(&path).unwrap(), b"[a]\x00");
    }
}
