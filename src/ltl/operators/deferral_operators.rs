//! Deferral wrappers holding a resolved environment for a live sibling.

use crate::ltl::core::{BoxOperator, Operator, Token};
use crate::ltl::environment::Environment;
use std::fmt;

/// Defers `env` for later ANDing with everything `child` emits.
///
/// Returns `None` when there is no child to wrap. If the held environment is
/// reducible and matching it is the conjunction identity, so the child is
/// returned directly.
pub fn and_environment<T: Token>(
    env: Environment<T>,
    child: Option<BoxOperator<T>>,
) -> Option<BoxOperator<T>> {
    let child = child?;
    if env.reducible() && env.matching() {
        return Some(child);
    }
    Some(Box::new(AndEnvironment { env, child }))
}

/// Defers `env` for later ORing with everything `child` emits.
///
/// Returns `None` when there is no child to wrap. If the held environment is
/// reducible and not matching it is the disjunction identity, so the child is
/// returned directly.
pub fn or_environment<T: Token>(
    env: Environment<T>,
    child: Option<BoxOperator<T>>,
) -> Option<BoxOperator<T>> {
    let child = child?;
    if env.reducible() && !env.matching() {
        return Some(child);
    }
    Some(Box::new(OrEnvironment { env, child }))
}

#[derive(Clone)]
struct AndEnvironment<T: Token> {
    env: Environment<T>,
    child: BoxOperator<T>,
}

impl<T: Token> Operator<T> for AndEnvironment<T> {
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        // If the held environment is not matching and the child can only emit
        // reducible environments, the conjunction can never improve on the
        // held environment; resolve with it immediately.
        if !self.env.matching() && self.child.reducible() {
            return (None, self.env.clone());
        }
        let (next, env) = self.child.step(token);
        (
            and_environment(self.env.clone(), next),
            self.env.and(&env),
        )
    }

    fn reducible(&self) -> bool {
        self.env.reducible() && self.child.reducible()
    }
}

impl<T: Token> fmt::Display for AndEnvironment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AND_ENVIRONMENT({})", self.env)
    }
}

#[derive(Clone)]
struct OrEnvironment<T: Token> {
    env: Environment<T>,
    child: BoxOperator<T>,
}

impl<T: Token> Operator<T> for OrEnvironment<T> {
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        // Dual of the conjunction wrapper: a matching held environment over a
        // reducible child already decides the disjunction.
        if self.env.matching() && self.child.reducible() {
            return (None, self.env.clone());
        }
        let (next, env) = self.child.step(token);
        (or_environment(self.env.clone(), next), env.or(&self.env))
    }

    fn reducible(&self) -> bool {
        self.env.reducible() && self.child.reducible()
    }
}

impl<T: Token> fmt::Display for OrEnvironment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OR_ENVIRONMENT({})", self.env)
    }
}
