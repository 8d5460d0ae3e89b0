//! Binding and referencing terminal operators.
//!
//! A binder `[$name<-]` consumes one token and claims a binding for `name`
//! extracted from that token. A reference `[$name]` consumes one token and
//! records an obligation that `name` resolves to the extracted value; the
//! resulting environment stays non-matching until a binding for the same
//! name satisfies it elsewhere in the environment tree.
//!
//! Two binders for the same name only conflict if their environments are
//! actually combined: an expression may bind the same name to different
//! values on parallel branches, and an error is raised at the moment two
//! concrete bindings meet in a single environment. This is the most common
//! surprise when writing binding expressions; prefer binding each name once.

use crate::ltl::bindings::Bindings;
use crate::ltl::core::{BoxOperator, MatchError, Operator, Token};
use crate::ltl::environment::{BindingNode, Environment};
use std::fmt;
use std::sync::Arc;

/// Extracts the bindings for `name` from a token. Host-supplied.
pub type ExtractFn<T> = Arc<dyn Fn(&str, &T) -> Result<Bindings, MatchError>>;

/// Produces binding and referencing operators sharing one extraction
/// capability and capture policy.
#[derive(Clone)]
pub struct BinderBuilder<T: Token> {
    extract: ExtractFn<T>,
    capture: bool,
}

impl<T: Token> BinderBuilder<T> {
    pub fn new(capture: bool, extract: ExtractFn<T>) -> Self {
        BinderBuilder { extract, capture }
    }

    /// Returns an operator which, on step, extracts bindings from the token
    /// and claims them in a matching environment.
    pub fn bind(&self, name: &str) -> BoxOperator<T> {
        Box::new(Binder {
            name: name.to_string(),
            capture: self.capture,
            extract: Arc::clone(&self.extract),
        })
    }

    /// Returns an operator which, on step, extracts bindings from the token
    /// and records them as references in a non-matching environment.
    pub fn reference(&self, name: &str) -> BoxOperator<T> {
        Box::new(Referencer {
            name: name.to_string(),
            capture: self.capture,
            extract: Arc::clone(&self.extract),
        })
    }
}

#[derive(Clone)]
struct Binder<T: Token> {
    name: String,
    capture: bool,
    extract: ExtractFn<T>,
}

impl<T: Token> Operator<T> for Binder<T> {
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        if token.is_end_of_input() {
            return (None, Environment::State(false));
        }
        match (self.extract)(&self.name, token) {
            Err(err) => (None, Environment::Error(err)),
            Ok(bound) => {
                let mut builder = BindingNode::builder().bound(bound);
                if self.capture {
                    builder = builder.captured([token.clone()]);
                }
                (None, builder.build())
            }
        }
    }
}

impl<T: Token> fmt::Display for Binder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[${}<-]", self.name)
    }
}

#[derive(Clone)]
struct Referencer<T: Token> {
    name: String,
    capture: bool,
    extract: ExtractFn<T>,
}

impl<T: Token> Operator<T> for Referencer<T> {
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        if token.is_end_of_input() {
            return (None, Environment::State(false));
        }
        match (self.extract)(&self.name, token) {
            Err(err) => (None, Environment::Error(err)),
            Ok(referenced) => {
                let mut builder = BindingNode::builder().referenced(referenced);
                if self.capture {
                    builder = builder.captured([token.clone()]);
                }
                (None, builder.build())
            }
        }
    }
}

impl<T: Token> fmt::Display for Referencer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[${}]", self.name)
    }
}
