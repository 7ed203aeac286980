use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// ANSI palette; every code is empty when colors are off.
#[derive(Clone, Copy)]
pub struct Colors {
    pub error: &'static str,
    pub warning: &'static str,
    pub success: &'static str,
    pub info: &'static str,
    pub section: &'static str,
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                error: "",
                warning: "",
                success: "",
                info: "",
                section: "",
                enabled,
            };
        }
        Self {
            error: "\x1b[31m",
            warning: "\x1b[33m",
            success: "\x1b[32m",
            info: "\x1b[36m",
            section: "\x1b[1m",
            enabled,
        }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled {
            RESET
        } else {
            ""
        }
    }

    /// Wrap `text` in `color` and a reset.
    pub fn paint(&self, color: &str, text: &str) -> String {
        format!("{color}{text}{}", self.reset())
    }
}

/// Priority: --no-color > --color > NO_COLOR env > TTY detection
pub fn should_use_colors(force_color: bool, no_color: bool) -> bool {
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
}
