//! Configuration file support for inifile.
//!
//! This module provides:
//! - Loading configuration from `inifile.toml`
//! - Config file discovery (search upward from current directory)
//! - Merging CLI args, config file, `.editorconfig` and defaults
//! - Template generation with `inifile init`

mod editorconfig;
mod file;
mod init;
mod merge;
mod toml_schema;

pub use editorconfig::{find_editorconfig, parse_editorconfig, EditorConfigSettings};
pub use file::{find_config_file, find_file_upward, load_config, ConfigError};
pub use init::{generate_init_file, generate_init_file_in, INIFILE_TOML_TEMPLATE};
pub use merge::{merge_format_config, CliFormatOptions};
pub use toml_schema::{FormatSection, InifileToml};
