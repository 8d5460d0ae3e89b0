//! # OLTL - Online Linear Temporal Logic
//!
//! `oltl` compiles linear temporal logic (LTL) expressions into incremental
//! matchers that consume a stream of tokens one at a time and, after each
//! token, report whether the prefix seen so far satisfies the expression.
//!
//! It includes:
//! - a streaming operator algebra (NOT, AND, OR, NEXT, THEN, SEQUENCE,
//!   EVENTUALLY, UNTIL, RELEASE, GLOBALLY, LIMIT),
//! - a binding environment that tracks name bindings, references, and
//!   captured tokens through logical composition,
//! - an expression parser with host-injected terminal matchers, and
//! - a ready-made rune-token text domain for string streams.
//!
//! ## Simple usage
//!
//! ```
//! use oltl::ltl::parser::parse_ltl;
//! use oltl::text::{self, MatcherConfig, RuneToken};
//!
//! let generator = text::generator(MatcherConfig::default());
//! let mut op = Some(parse_ltl("[a] THEN EVENTUALLY [b]", &generator).unwrap());
//!
//! let mut env = None;
//! for (index, ch) in "axxb".chars().enumerate() {
//!     let token = RuneToken::new(ch, index);
//!     let (next, step_env) = oltl::ltl::step(op.as_ref(), &token);
//!     op = next;
//!     env = Some(step_env);
//! }
//! assert!(env.unwrap().matching());
//! ```
//!
//! Operators are immutable values: stepping one returns a fresh continuation
//! (or `None` once the query has resolved) together with an [`ltl::Environment`]
//! describing the match status of the prefix consumed so far. The same
//! operator instance may seed any number of independent matcher runs.

pub mod ltl;
pub mod text;
