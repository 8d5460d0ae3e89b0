//! Logical negation.

use crate::ltl::core::{BoxOperator, Operator, Token};
use crate::ltl::environment::Environment;
use std::fmt;

/// Returns the logical NOT of the argument, inverting every environment it
/// emits.
pub fn not<T: Token>(child: BoxOperator<T>) -> BoxOperator<T> {
    Box::new(Not { child })
}

pub(crate) fn not_opt<T: Token>(child: Option<BoxOperator<T>>) -> Option<BoxOperator<T>> {
    child.map(not)
}

#[derive(Clone)]
struct Not<T: Token> {
    child: BoxOperator<T>,
}

impl<T: Token> Operator<T> for Not<T> {
    fn step(&self, token: &T) -> (Option<BoxOperator<T>>, Environment<T>) {
        let (next, env) = self.child.step(token);
        (not_opt(next), env.not())
    }

    fn reducible(&self) -> bool {
        self.child.reducible()
    }
}

impl<T: Token> fmt::Display for Not<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NOT({})", self.child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{MatcherConfig, RuneToken, StringMatcher};

    #[test]
    fn not_inverts_a_terminal_match() {
        let op = not(Box::new(StringMatcher::new("a", MatcherConfig::default())));
        let (next, env) = op.step(&RuneToken::new('b', 0));
        assert!(next.is_none());
        assert!(env.matching());

        let op = not(Box::new(StringMatcher::new("a", MatcherConfig::default())));
        let (_, env) = op.step(&RuneToken::new('a', 0));
        assert!(!env.matching());
    }

    #[test]
    fn display_wraps_the_child() {
        let op = not(Box::new(StringMatcher::new("a", MatcherConfig::default())));
        assert_eq!(op.to_string(), "NOT([a])");
    }
}
