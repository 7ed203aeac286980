//! TOML schema definitions for inifile.toml

use serde::{Deserialize, Serialize};

/// Root structure for inifile.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct InifileToml {
    /// Formatting settings
    #[serde(default)]
    pub format: FormatSection,
}

/// `[format]` section in inifile.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FormatSection {
    /// Indent field lines with a tab (default: false)
    pub tabbed: Option<bool>,

    /// Keep scanning a section after a boolean field (default: false)
    pub lenient: Option<bool>,

    /// Extensions formatted when walking directories (default: ["ini"])
    pub extensions: Option<Vec<String>>,
}
