//! Runtime settings.
//!
//! Settings start from their defaults and are overridden by environment
//! variables:
//!
//! ```text
//! SHCAT_THEME=InspiredGitHub   # any bundled theme name
//! SHCAT_COLOR=off              # true/yes/on/1 or false/no/off/0
//! ```

use std::collections::HashMap;
use std::env;
use std::io::{self, IsTerminal};
use crate::theme::DEFAULT_THEME;

const ENV_PREFIX: &str = "SHCAT_";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Name of the theme used to style tokens.
    pub theme: String,
    /// Whether to emit colors and attributes, or plain text.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            color: true,
        }
    }
}

impl Config {
    /// Loads settings from the environment. Color defaults to on only
    /// when standard output is a terminal.
    pub fn load() -> Self {
        let mut config = Config {
            color: io::stdout().is_terminal(),
            ..Config::default()
        };
        config.apply(&Self::from_env(env::vars()));

        config
    }

    /// Picks prefixed variables out of `vars`, keyed by their
    /// lowercased, unprefixed names.
    fn from_env<I>(vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ENV_PREFIX)
                    .map(|name| (name.to_lowercase(), value.trim().to_string()))
            })
            .collect()
    }

    fn apply(&mut self, settings: &HashMap<String, String>) {
        if let Some(value) = settings.get("theme") {
            if !value.is_empty() {
                self.theme = value.clone();
            }
        }

        if let Some(value) = settings.get("color") {
            if let Some(color) = parse_bool(value) {
                self.color = color;
            }
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
