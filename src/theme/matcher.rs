use crate::theme::{ResolvedStyle, ThemeRule};
use syntect::parsing::Scope;

/// Resolves the style for a token with the given scopes.
///
/// Rules are scanned in the theme's order, and a rule matches when its
/// selector is equal to, or a dot-delimited prefix of, any of the scopes.
/// Each channel (foreground, background, font style) is taken from the
/// first matching rule that sets it; later matches never override a channel
/// once it's set. Channels no matching rule sets stay unset.
///
/// # Examples
///
/// ```
/// use shcat::theme::{resolve, ThemeRule};
/// use syntect::highlighting::Color;
/// use syntect::parsing::Scope;
///
/// let red = Color{ r: 255, g: 0, b: 0, a: 255 };
/// let rules = vec![ThemeRule{
///     selector: Scope::new("comment").unwrap(),
///     foreground: Some(red),
///     background: None,
///     font_style: None,
/// }];
/// let style = resolve(&[Scope::new("comment.line.double-slash").unwrap()], &rules);
/// assert_eq!(style.foreground, Some(red));
/// assert_eq!(style.background, None);
/// ```
pub fn resolve(scopes: &[Scope], rules: &[ThemeRule]) -> ResolvedStyle {
    let mut style = ResolvedStyle::default();
    if scopes.is_empty() {
        return style
    }

    for rule in rules.iter().filter(|rule| rule.matches(scopes)) {
        if style.foreground.is_none() {
            style.foreground = rule.foreground;
        }
        if style.background.is_none() {
            style.background = rule.background;
        }
        if style.font_style.is_none() {
            // An empty font style doesn't count as setting the channel.
            style.font_style = rule.font_style.filter(|font_style| !font_style.is_empty());
        }

        if style.is_complete() {
            break;
        }
    }

    style
}

impl ThemeRule {
    /// Whether the rule's selector matches any of `scopes`.
    pub fn matches(&self, scopes: &[Scope]) -> bool {
        scopes.iter().any(|&scope| self.selector.is_prefix_of(scope))
    }
}

impl ResolvedStyle {
    fn is_complete(&self) -> bool {
        self.foreground.is_some() && self.background.is_some() && self.font_style.is_some()
    }
}
