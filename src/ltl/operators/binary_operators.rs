//! Logical conjunction and disjunction.

use crate::ltl::core::{BoxOperator, Operator, Token};
use crate::ltl::environment::{either_erroring, Environment};
use crate::ltl::operators::deferral_operators::and_environment;
use std::fmt;

/// Returns the logical AND of the two arguments.
pub fn and<T: Token>(left: BoxOperator<T>, right: BoxOperator<T>) -> BoxOperator<T> {
    Box::new(And { left, right })
}

/// Returns the logical OR of the two arguments.
pub fn or<T: Token>(left: BoxOperator<T>, right: BoxOperator<T>) -> BoxOperator<T> {
    Box::new(Or { left, right })
}

pub(crate) fn or_opt<T: Token>(
    left: Option<BoxOperator<T>>,
    right: Option<BoxOperator<T>>,
) -> Option<BoxOperator<T>> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(left), Some(right)) => Some(or(left, right)),
    }
}

#[derive(Clone)]
struct And<T: Token> {
    left: BoxOperator<T>,
    right: BoxOperator<T>,
}

impl<T: Token> Operator<T> for And<T> {
    /// Feeds the token to both children. When one child resolves before the
    /// other, its final environment is parked in an `and_environment` wrapper
    /// so it keeps being ANDed into everything the surviving child emits:
    /// both sides are necessary for a conjunction, however early one of them
    /// resolves.
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        let (next_left, left_env) = self.left.step(token);
        let (next_right, right_env) = self.right.step(token);
        if let Some(err) = either_erroring(&left_env, &right_env) {
            return (None, err);
        }
        let env = left_env.and(&right_env);
        let continuation = match (next_left, next_right) {
            (Some(left), Some(right)) => Some(and(left, right)),
            (None, survivor @ Some(_)) => and_environment(left_env, survivor),
            (survivor @ Some(_), None) => and_environment(right_env, survivor),
            (None, None) => None,
        };
        (continuation, env)
    }

    fn reducible(&self) -> bool {
        self.left.reducible() && self.right.reducible()
    }
}

impl<T: Token> fmt::Display for And<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AND({},{})", self.left, self.right)
    }
}

#[derive(Clone)]
struct Or<T: Token> {
    left: BoxOperator<T>,
    right: BoxOperator<T>,
}

impl<T: Token> Operator<T> for Or<T> {
    /// Feeds the token to both children. A disjunction simply follows the
    /// first of its sides to resolve: a terminated side contributes its final
    /// environment to this step's emission and is then dropped from the
    /// continuation.
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        let (next_left, left_env) = self.left.step(token);
        let (next_right, right_env) = self.right.step(token);
        if let Some(err) = either_erroring(&left_env, &right_env) {
            return (None, err);
        }
        let env = left_env.or(&right_env);
        (or_opt(next_left, next_right), env)
    }

    fn reducible(&self) -> bool {
        self.left.reducible() && self.right.reducible()
    }
}

impl<T: Token> fmt::Display for Or<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OR({},{})", self.left, self.right)
    }
}
