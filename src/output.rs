//! # Output Configuration
//!
//! Explicit configuration object for user-facing output, passed into the
//! command entry points instead of living in process-wide state. Controls
//! color usage (respecting `--color`, `NO_COLOR`, `CLICOLOR`, `TERM=dumb`)
//! and the quiet/verbose switches.

use std::env;

/// Output configuration for a single invocation.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Whether styled output should be used.
    pub use_color: bool,
    /// Suppress everything except errors.
    pub quiet: bool,
    /// Show per-repository progress detail.
    pub verbose: bool,
}

impl OutputConfig {
    /// Build a configuration from the `--color` flag value and the command's
    /// quiet/verbose flags.
    ///
    /// `--color=always` forces styling on, `--color=never` forces it off, and
    /// anything else detects support from the environment.
    pub fn new(color_flag: &str, quiet: bool, verbose: bool) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self {
            use_color,
            quiet,
            verbose,
        }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // https://no-color.org/ - presence alone disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Style `text` for terminal output when colors are enabled.
    pub fn styled(&self, text: &str, style: console::Style) -> String {
        if self.use_color {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            use_color: false,
            quiet: false,
            verbose: false,
        }
    }
}
