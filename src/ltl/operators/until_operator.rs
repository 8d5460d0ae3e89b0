//! Binary temporal operators: `until` and its dual `release`.

use crate::ltl::core::{BoxOperator, Operator, Token};
use crate::ltl::environment::Environment;
use crate::ltl::operators::binary_operators::or;
use crate::ltl::operators::not_operator::not;
use crate::ltl::operators::sequence_operators::then;
use crate::ltl::operators::stop_at_first_match;
use std::fmt;

/// Matches if `left` holds until `right` holds. `right` must ultimately
/// hold, but may hold immediately; once it does, the query resolves.
pub fn until<T: Token>(left: BoxOperator<T>, right: BoxOperator<T>) -> BoxOperator<T> {
    Box::new(Until { left, right })
}

/// Matches if `right` holds up to and including the point where `left`
/// holds. `left` need never hold, in which case `right` must hold
/// continually. Defined by duality: `release(a, b) = NOT(until(NOT a, NOT b))`.
pub fn release<T: Token>(left: BoxOperator<T>, right: BoxOperator<T>) -> BoxOperator<T> {
    Box::new(Release { left, right })
}

#[derive(Clone)]
struct Until<T: Token> {
    left: BoxOperator<T>,
    right: BoxOperator<T>,
}

impl<T: Token> Operator<T> for Until<T> {
    /// One step of the fixpoint `OR(right, THEN(left, until(left, right)))`,
    /// resolving the first time a matching environment is emitted.
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        let unrolled = or(
            self.right.clone(),
            then(self.left.clone(), Box::new(self.clone())),
        );
        stop_at_first_match(unrolled.step(token))
    }

    fn reducible(&self) -> bool {
        self.left.reducible() && self.right.reducible()
    }
}

impl<T: Token> fmt::Display for Until<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UNTIL({},{})", self.left, self.right)
    }
}

#[derive(Clone)]
struct Release<T: Token> {
    left: BoxOperator<T>,
    right: BoxOperator<T>,
}

impl<T: Token> Operator<T> for Release<T> {
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        not(until(not(self.left.clone()), not(self.right.clone()))).step(token)
    }

    fn reducible(&self) -> bool {
        self.left.reducible() && self.right.reducible()
    }
}

impl<T: Token> fmt::Display for Release<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RELEASE({},{})", self.left, self.right)
    }
}
