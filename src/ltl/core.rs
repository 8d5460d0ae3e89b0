//! Token and operator contracts shared by the whole engine.

use crate::ltl::environment::Environment;
use dyn_clone::{clone_trait_object, DynClone};
use std::fmt::Display;
use std::hash::Hash;

/// An input token consumed by a query. Tokens are host-supplied values; the
/// engine only requires identity (for captured-token sets), a human-readable
/// rendering, and an end-of-input marker. Tokens, once created, should not be
/// modified.
pub trait Token: Clone + Eq + Hash + Display + 'static {
    /// Returns true if the receiver marks the end of an input stream.
    fn is_end_of_input(&self) -> bool;
}

/// A boxed, clonable LTL operator.
pub type BoxOperator<T> = Box<dyn Operator<T>>;

/// An LTL query operator.
///
/// Operators are immutable: applying a token produces a fresh continuation
/// operator instead of mutating the receiver, so a single operator value may
/// be advanced by any number of independent callers.
pub trait Operator<T: Token>: DynClone + Display {
    /// Applies a token to the receiver, returning the continuation to feed
    /// the next token (or `None` if the query has resolved and will accept no
    /// further input) and the environment of the query after the token is
    /// applied. An error encountered while processing the query is indicated
    /// by returning an erroring environment.
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>);

    /// Returns true iff `step` can *only* return reducible environments. If
    /// the receiver might return an irreducible environment, this must return
    /// false. It is always safe to return false, but this may impact
    /// performance.
    fn reducible(&self) -> bool {
        false
    }
}

clone_trait_object!(<T: Token> Operator<T>);

/// A resolution-safe equivalent to `op.step()`: a query that has already
/// resolved reports `NotMatching` for any further token.
pub fn step<T: Token>(
    op: Option<&BoxOperator<T>>,
    token: &T,
) -> (Option<BoxOperator<T>>, Environment<T>) {
    match op {
        Some(op) => op.step(token),
        None => (None, Environment::State(false)),
    }
}

/// A runtime matching error, carried by erroring environments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// Two bindings assign different values to the same name.
    #[error("key {key} binds conflicting values {left} and {right}")]
    KeyConflict {
        key: String,
        left: String,
        right: String,
    },
    /// Bound values of different runtime types were compared.
    #[error("cannot compare {left_type} value {left} with {right_type} value {right}")]
    TypeMismatch {
        left_type: &'static str,
        left: String,
        right_type: &'static str,
        right: String,
    },
    /// A terminal matcher received a token outside its domain.
    #[error("{0}")]
    Token(String),
    /// A matcher generator rejected its source text.
    #[error("{0}")]
    Matcher(String),
}
