//! Single-child temporal operators: `next`, `limit`, `eventually`, and
//! `globally`.

use crate::ltl::core::{BoxOperator, Operator, Token};
use crate::ltl::environment::Environment;
use crate::ltl::operators::binary_operators::or;
use crate::ltl::operators::sequence_operators::then;
use crate::ltl::operators::stop_at_first_match;
use std::fmt;

/// Ignores a single input token, then attempts to match its child.
pub fn next<T: Token>(child: BoxOperator<T>) -> BoxOperator<T> {
    Box::new(Next { child })
}

/// Equivalent to the provided operator, except that if it does not resolve
/// within `n` tokens the query resolves without matching. A bound of zero or
/// less never matches.
pub fn limit<T: Token>(n: i64, child: BoxOperator<T>) -> BoxOperator<T> {
    Box::new(Limit { n, child })
}

fn limit_opt<T: Token>(n: i64, child: Option<BoxOperator<T>>) -> Option<BoxOperator<T>> {
    if n <= 0 {
        return None;
    }
    child.map(|child| limit(n, child))
}

/// Equivalent to its argument matching at some point along the token stream.
///
/// Each token starts a fresh attempt of the child in parallel with the
/// attempts already underway, so an unlimited `eventually` can hold live
/// sub-matchers proportional to the stream length; wrap it in [`limit`] to
/// bound the window. The query resolves the first time it emits a matching
/// environment.
pub fn eventually<T: Token>(child: BoxOperator<T>) -> BoxOperator<T> {
    Box::new(Eventually { child })
}

/// Matches as long as its child matches.
pub fn globally<T: Token>(child: BoxOperator<T>) -> BoxOperator<T> {
    Box::new(Globally { child })
}

#[derive(Clone)]
struct Next<T: Token> {
    child: BoxOperator<T>,
}

impl<T: Token> Operator<T> for Next<T> {
    fn step(&self, _token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        (Some(self.child.clone()), Environment::State(false))
    }

    fn reducible(&self) -> bool {
        self.child.reducible()
    }
}

impl<T: Token> fmt::Display for Next<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NEXT({})", self.child)
    }
}

#[derive(Clone)]
struct Limit<T: Token> {
    n: i64,
    child: BoxOperator<T>,
}

impl<T: Token> Operator<T> for Limit<T> {
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        if self.n <= 0 {
            return (None, Environment::State(false));
        }
        let (next, env) = self.child.step(token);
        (limit_opt(self.n - 1, next), env)
    }

    fn reducible(&self) -> bool {
        self.child.reducible()
    }
}

impl<T: Token> fmt::Display for Limit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT({})({})", self.n, self.child)
    }
}

#[derive(Clone)]
struct Eventually<T: Token> {
    child: BoxOperator<T>,
}

impl<T: Token> Operator<T> for Eventually<T> {
    /// One step of the fixpoint `OR(child, NEXT(eventually(child)))`: the
    /// current attempt runs in parallel with a delayed fresh copy of the
    /// whole query.
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        let unrolled = or(self.child.clone(), next(Box::new(self.clone())));
        stop_at_first_match(unrolled.step(token))
    }

    fn reducible(&self) -> bool {
        self.child.reducible()
    }
}

impl<T: Token> fmt::Display for Eventually<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EVENTUALLY({})", self.child)
    }
}

#[derive(Clone)]
struct Globally<T: Token> {
    child: BoxOperator<T>,
}

impl<T: Token> Operator<T> for Globally<T> {
    /// Steps the current attempt of the child. A child that resolves without
    /// matching resolves the whole query; one that resolves matching is
    /// restarted on the next token. While the child is still live, the
    /// continuation runs it in parallel with a fresh attempt starting after
    /// it resolves.
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        let (next, env) = self.child.step(token);
        match next {
            None if !env.matching() => (None, env),
            None => (Some(globally(self.child.clone())), env),
            Some(live) => (
                Some(or(live.clone(), then(live, globally(self.child.clone())))),
                env,
            ),
        }
    }

    fn reducible(&self) -> bool {
        self.child.reducible()
    }
}

impl<T: Token> fmt::Display for Globally<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GLOBALLY({})", self.child)
    }
}
