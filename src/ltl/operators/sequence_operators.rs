//! Temporal concatenation.

use crate::ltl::core::{BoxOperator, Operator, Token};
use crate::ltl::environment::Environment;
use crate::ltl::operators::deferral_operators::and_environment;
use std::fmt;

/// Returns the temporal concatenation of the two arguments: tokens are
/// directed to `left` until it resolves, then to `right`, with `left`'s final
/// environment ANDed into everything `right` emits.
pub fn then<T: Token>(left: BoxOperator<T>, right: BoxOperator<T>) -> BoxOperator<T> {
    Box::new(Then { left, right })
}

/// Returns the temporal concatenation of all the arguments:
/// `sequence([a, b, .., z])` is equivalent to `a THEN b THEN .. THEN z`. A
/// single-element sequence devolves to that element; an empty sequence never
/// matches.
pub fn sequence<T: Token>(children: Vec<BoxOperator<T>>) -> BoxOperator<T> {
    Box::new(Sequence { children })
}

#[derive(Clone)]
struct Then<T: Token> {
    left: BoxOperator<T>,
    right: BoxOperator<T>,
}

impl<T: Token> Operator<T> for Then<T> {
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        let (next, env) = self.left.step(token);
        match next {
            Some(left) => (Some(then(left, self.right.clone())), env),
            None => (
                and_environment(env, Some(self.right.clone())),
                Environment::State(false),
            ),
        }
    }

    fn reducible(&self) -> bool {
        self.left.reducible() && self.right.reducible()
    }
}

impl<T: Token> fmt::Display for Then<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "THEN({},{})", self.left, self.right)
    }
}

#[derive(Clone)]
struct Sequence<T: Token> {
    children: Vec<BoxOperator<T>>,
}

impl<T: Token> Operator<T> for Sequence<T> {
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        match self.children.len() {
            0 => (None, Environment::State(false)),
            1 => self.children[0].step(token),
            2 => then(self.children[0].clone(), self.children[1].clone()).step(token),
            _ => then(
                self.children[0].clone(),
                sequence(self.children[1..].to_vec()),
            )
            .step(token),
        }
    }

    fn reducible(&self) -> bool {
        self.children.iter().all(|child| child.reducible())
    }
}

impl<T: Token> fmt::Display for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.children.iter().map(|c| c.to_string()).collect();
        write!(f, "SEQUENCE({})", rendered.join(","))
    }
}
