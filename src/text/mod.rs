//! A ready-made token domain for character streams.
//!
//! [`RuneToken`] wraps a character and its stream index; [`StringMatcher`]
//! is a terminal operator matching a literal string one token at a time; and
//! [`generator`] adapts the domain to the parser, turning bracket literals
//! into matchers, binders (`[$name<-]`), and references (`[$name]`).

mod rune_token;
mod string_matcher;

pub use rune_token::RuneToken;
pub use string_matcher::{generator, MatcherConfig, StringMatcher};
