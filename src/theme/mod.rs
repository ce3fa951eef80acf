mod matcher;

pub use self::matcher::resolve;

use crate::errors::*;
use syntect::highlighting::{Color, FontStyle, Theme, ThemeSet};
use syntect::parsing::Scope;
use tracing::{event, Level};

/// The theme used when none is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// A single scope selector and the style attributes it sets.
/// Attributes set to `None` leave the channel to other rules.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeRule {
    pub selector: Scope,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub font_style: Option<FontStyle>,
}

/// The final style for a token. `None` means default terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolvedStyle {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub font_style: Option<FontStyle>,
}

impl ResolvedStyle {
    /// Whether every channel is unset.
    pub fn is_unset(&self) -> bool {
        self.foreground.is_none() && self.background.is_none() && self.font_style.is_none()
    }
}

/// A theme's rules, in the theme's own priority order.
#[derive(Clone, Debug, Default)]
pub struct ThemeRules {
    rules: Vec<ThemeRule>,
}

impl ThemeRules {
    pub fn new(rules: Vec<ThemeRule>) -> ThemeRules {
        ThemeRules{ rules }
    }

    /// Flattens a theme into rules. Every selector in an item's selector
    /// list becomes its own rule, keyed on the innermost scope of its path.
    /// That makes path selectors broader than the theme wrote them: a rule
    /// for `meta.block string.quoted` applies to every `string.quoted`
    /// token, inside a block or not. Selectors with exclusions can't be
    /// expressed as a single scope and are skipped.
    pub fn from_theme(theme: &Theme) -> ThemeRules {
        let mut rules = Vec::new();

        for item in &theme.scopes {
            for selector in &item.scope.selectors {
                if !selector.excludes.is_empty() {
                    continue;
                }

                if let Some(&scope) = selector.path.as_slice().last() {
                    rules.push(ThemeRule{
                        selector: scope,
                        foreground: item.style.foreground,
                        background: item.style.background,
                        font_style: item.style.font_style,
                    });
                }
            }
        }

        ThemeRules{ rules }
    }

    pub fn as_slice(&self) -> &[ThemeRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolves the style for a token's scopes against these rules.
    pub fn resolve(&self, scopes: &[Scope]) -> ResolvedStyle {
        resolve(scopes, &self.rules)
    }
}

/// The themes bundled with syntect.
pub struct ThemeLibrary {
    theme_set: ThemeSet,
}

impl ThemeLibrary {
    pub fn new() -> ThemeLibrary {
        ThemeLibrary{ theme_set: ThemeSet::load_defaults() }
    }

    /// Loads the named theme's rules.
    pub fn theme(&self, name: &str) -> Result<ThemeRules> {
        let theme = self.theme_set.themes.get(name)
            .ok_or_else(|| ErrorKind::ThemeNotFound(name.to_string()))?;
        let rules = ThemeRules::from_theme(theme);
        event!(Level::DEBUG, "Loaded theme {} with {} rules", name, rules.len());

        Ok(rules)
    }
}

impl Default for ThemeLibrary {
    fn default() -> Self {
        ThemeLibrary::new()
    }
}
