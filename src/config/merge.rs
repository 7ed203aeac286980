//! Configuration merging logic
//!
//! Priority: CLI args > inifile.toml > .editorconfig > defaults

use crate::{FormatConfig, ParseMode};

use super::editorconfig::EditorConfigSettings;
use super::toml_schema::FormatSection;

/// CLI options that can override config file settings.
///
/// `None` means the flag was not given.
#[derive(Debug, Default)]
pub struct CliFormatOptions {
    pub tabbed: Option<bool>,
    pub lenient: Option<bool>,
}

pub fn merge_format_config(
    cli: &CliFormatOptions,
    toml: Option<&FormatSection>,
    editorconfig: Option<&EditorConfigSettings>,
) -> FormatConfig {
    let defaults = FormatConfig::default();

    let lenient = cli
        .lenient
        .or_else(|| toml.and_then(|t| t.lenient))
        .unwrap_or(false);

    FormatConfig {
        tabbed: cli
            .tabbed
            .or_else(|| toml.and_then(|t| t.tabbed))
            .or_else(|| editorconfig.and_then(EditorConfigSettings::tabbed))
            .unwrap_or(defaults.tabbed),
        mode: if lenient {
            ParseMode::Lenient
        } else {
            defaults.mode
        },
        extensions: toml
            .and_then(|t| t.extensions.clone())
            .unwrap_or(defaults.extensions),
    }
}
