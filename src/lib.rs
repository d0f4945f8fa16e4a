//! Moment library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod inference;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which completion backend to talk to.
#[derive(Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    #[default]
    Groq,
    #[value(name = "lmstudio")]
    LmStudio,
}
