// Syntax highlighting
extern crate syntect;

// Grapheme cluster iteration
extern crate unicode_segmentation;

// Error definition/handling
#[macro_use]
extern crate error_chain;

pub mod cli;
pub mod config;
pub mod display;
pub mod grammar;
pub mod highlight;
pub mod theme;
pub mod token;
pub mod util;
mod errors;

pub use crate::errors::*;
pub use crate::config::Config;
pub use crate::grammar::{Grammar, GrammarProvider, LineTokenizer, SyntaxLibrary};
pub use crate::highlight::Highlighter;
pub use crate::theme::{ThemeLibrary, ThemeRules};
