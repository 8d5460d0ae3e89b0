//! Match-state carriers closed under AND/OR/NOT.
//!
//! An [`Environment`] is the result of stepping an operator. The kinds are a
//! closed set:
//! - [`Environment::State`] carries only a match status,
//! - [`Environment::Error`] carries a runtime matching error and absorbs all
//!   combination,
//! - [`Environment::Binding`] is a leaf carrying bindings, references, and
//!   captures, and
//! - [`Environment::Binary`] is an internal AND/OR node over two children.
//!
//! The combinators resolve references against newly combined bindings and
//! merge structurally equivalent subtrees, which keeps environment trees from
//! growing without bound on long streams.

mod binary_node;
mod binding_node;

pub use binary_node::{BinaryKind, BinaryNode};
pub use binding_node::{BindingNode, BindingNodeBuilder};

use crate::ltl::bindings::Bindings;
use crate::ltl::captures::Captures;
use crate::ltl::core::{MatchError, Token};
use std::fmt;

/// The environment of a query: its match status plus any sideband state.
/// Environments are immutable values; all combinators return new instances.
#[derive(Debug, Clone, PartialEq)]
pub enum Environment<T: Token> {
    /// A bare match status.
    State(bool),
    /// An erroring environment. Always non-matching; absorbs AND/OR/NOT.
    Error(MatchError),
    /// A leaf carrying bindings, references, and captures.
    Binding(BindingNode<T>),
    /// An AND/OR node over two child environments.
    Binary(BinaryNode<T>),
}

impl<T: Token> Environment<T> {
    /// Returns the match status of the environment. Environments with
    /// outstanding references never match.
    pub fn matching(&self) -> bool {
        match self {
            Environment::State(matching) => *matching,
            Environment::Error(_) => false,
            Environment::Binding(node) => node.matching(),
            Environment::Binary(node) => node.matching(),
        }
    }

    /// Returns the environment's error, if it is erroring.
    pub fn error(&self) -> Option<&MatchError> {
        match self {
            Environment::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_erroring(&self) -> bool {
        matches!(self, Environment::Error(_))
    }

    /// Returns true iff the environment's only state is its match status and
    /// error. Irreducible environments convey sideband state that cannot
    /// safely be discarded, or their final match status is pending such
    /// state.
    pub fn reducible(&self) -> bool {
        match self {
            Environment::State(_) => true,
            Environment::Error(_) => true,
            Environment::Binding(node) => node.reducible(),
            Environment::Binary(_) => false,
        }
    }

    /// Returns the bindings claimed by this environment. Leaf bindings are
    /// only claimed while the leaf is matching.
    pub fn bindings(&self) -> Bindings {
        match self {
            Environment::State(_) | Environment::Error(_) => Bindings::default(),
            Environment::Binding(node) => {
                if node.matching() {
                    node.bound().clone()
                } else {
                    Bindings::default()
                }
            }
            Environment::Binary(node) => node.bound().clone(),
        }
    }

    /// Returns the tokens captured by this environment. Binary nodes collect
    /// captures from their matching children only.
    pub fn captures(&self) -> Captures<T> {
        match self {
            Environment::State(_) | Environment::Error(_) => Captures::default(),
            Environment::Binding(node) => node.caps().clone(),
            Environment::Binary(node) => node.captures(),
        }
    }

    /// Returns the logical AND of the receiver and argument.
    pub fn and(&self, other: &Environment<T>) -> Environment<T> {
        and(self, other)
    }

    /// Returns the logical OR of the receiver and argument.
    pub fn or(&self, other: &Environment<T>) -> Environment<T> {
        or(self, other)
    }

    /// Returns the logical NOT of the receiver. Binding leaves flip their
    /// match status and capture polarity but keep bindings and references;
    /// binary nodes apply De Morgan's laws.
    pub fn not(&self) -> Environment<T> {
        match self {
            Environment::State(matching) => Environment::State(!matching),
            Environment::Error(err) => Environment::Error(err.clone()),
            Environment::Binding(node) => Environment::Binding(node.not()),
            Environment::Binary(node) => match node.kind() {
                BinaryKind::And => or(&node.left().not(), &node.right().not()),
                BinaryKind::Or => and(&node.left().not(), &node.right().not()),
            },
        }
    }

    pub(crate) fn has_references(&self) -> bool {
        match self {
            Environment::State(_) | Environment::Error(_) => false,
            Environment::Binding(node) => node.has_references(),
            Environment::Binary(node) => node.has_references(),
        }
    }

    /// Applies the provided bindings throughout the environment, resolving
    /// references where possible. Binding leaves whose references cannot be
    /// satisfied by the combined bindings flip their match status; a binding
    /// conflict produces an erroring environment.
    pub(crate) fn apply_bindings(&self, bindings: &Bindings) -> Environment<T> {
        if bindings.is_empty() {
            return self.clone();
        }
        match self {
            Environment::State(_) | Environment::Error(_) => self.clone(),
            Environment::Binding(node) => node.apply_bindings(bindings),
            Environment::Binary(node) => {
                let left = node.left().apply_bindings(bindings);
                let right = node.right().apply_bindings(bindings);
                match node.kind() {
                    BinaryKind::And => and(&left, &right),
                    BinaryKind::Or => or(&left, &right),
                }
            }
        }
    }

    /// Attempts to merge the receiver with the argument. Two environments
    /// merge iff they are structurally equivalent up to child order; captures
    /// need not agree, and the merged result's captures are the union.
    pub(crate) fn merge(&self, other: &Environment<T>) -> Option<Environment<T>> {
        match (self, other) {
            (Environment::State(a), Environment::State(b)) if a == b => Some(self.clone()),
            (Environment::Binding(a), Environment::Binding(b)) => {
                a.merge(b).map(Environment::Binding)
            }
            (Environment::Binary(a), Environment::Binary(b)) => {
                a.merge(b).map(Environment::Binary)
            }
            _ => None,
        }
    }
}

impl<T: Token> fmt::Display for Environment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::State(true) => write!(f, "Matching"),
            Environment::State(false) => write!(f, "NotMatching"),
            Environment::Error(err) => write!(f, "{err}"),
            Environment::Binding(node) => write!(f, "{node}"),
            Environment::Binary(node) => write!(f, "{node}"),
        }
    }
}

/// Returns the erroring side of the pair, if either side is erroring.
pub(crate) fn either_erroring<T: Token>(
    a: &Environment<T>,
    b: &Environment<T>,
) -> Option<Environment<T>> {
    if a.is_erroring() {
        return Some(a.clone());
    }
    if b.is_erroring() {
        return Some(b.clone());
    }
    None
}

/// Attempts to reduce two environments to one: a side may be dropped if it is
/// reducible and its match status equals the combinator's identity.
fn reduce<T: Token>(
    left: &Environment<T>,
    right: &Environment<T>,
    matching: bool,
) -> Option<Environment<T>> {
    if left.reducible() && left.matching() == matching {
        return Some(right.clone());
    }
    if right.reducible() && right.matching() == matching {
        return Some(left.clone());
    }
    None
}

fn combine_sides<T: Token>(
    left: &Environment<T>,
    right: &Environment<T>,
    kind: BinaryKind,
) -> Environment<T> {
    if let Some(err) = either_erroring(left, right) {
        return err;
    }
    let identity = match kind {
        BinaryKind::And => true,
        BinaryKind::Or => false,
    };
    if let Some(reduced) = reduce(left, right, identity) {
        return reduced;
    }
    let bound = match left.bindings().combine(&right.bindings()) {
        Ok(bound) => bound,
        Err(err) => return Environment::Error(err),
    };
    let left = left.apply_bindings(&bound);
    let right = right.apply_bindings(&bound);
    if let Some(err) = either_erroring(&left, &right) {
        return err;
    }
    if let Some(merged) = left.merge(&right) {
        return merged;
    }
    Environment::Binary(BinaryNode::new(kind, left, right, bound))
}

fn and<T: Token>(left: &Environment<T>, right: &Environment<T>) -> Environment<T> {
    combine_sides(left, right, BinaryKind::And)
}

fn or<T: Token>(left: &Environment<T>, right: &Environment<T>) -> Environment<T> {
    combine_sides(left, right, BinaryKind::Or)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ltl::bindings::BoundValue;
    use crate::text::RuneToken;
    use pretty_assertions::assert_eq;

    fn sb(pairs: &[(&str, &str)]) -> Bindings {
        Bindings::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), BoundValue::Str(v.to_string()))),
        )
        .expect("failed to create bindings")
    }

    fn bind(pairs: &[(&str, &str)]) -> Environment<RuneToken> {
        BindingNode::builder().bound(sb(pairs)).build()
    }

    fn reference(pairs: &[(&str, &str)]) -> Environment<RuneToken> {
        BindingNode::builder().referenced(sb(pairs)).build()
    }

    fn cap(matching: bool, indices: &[usize]) -> Environment<RuneToken> {
        BindingNode::builder()
            .matching(matching)
            .captured(indices.iter().map(|idx| RuneToken::new('c', *idx)))
            .build()
    }

    #[test]
    fn state_algebra() {
        let t = Environment::<RuneToken>::State(true);
        let f = Environment::<RuneToken>::State(false);
        assert_eq!(t.and(&f), f);
        assert_eq!(t.and(&t), t);
        assert_eq!(f.or(&t), t);
        assert_eq!(f.or(&f), f);
        assert_eq!(t.not(), f);
        assert!(t.reducible() && f.reducible());
    }

    #[test]
    fn error_absorbs_combination() {
        let err = Environment::<RuneToken>::Error(MatchError::Matcher("boom".to_string()));
        let t = Environment::State(true);
        assert!(err.and(&t).is_erroring());
        assert!(t.and(&err).is_erroring());
        assert!(err.or(&t).is_erroring());
        assert!(err.not().is_erroring());
        assert!(!err.matching());
    }

    #[test]
    fn contentless_binding_node_is_a_state() {
        let env: Environment<RuneToken> = BindingNode::builder().matching(false).build();
        assert_eq!(env, Environment::State(false));
    }

    #[test]
    fn apply_bindings_satisfies_references() {
        let got = match reference(&[("a", "1")]) {
            Environment::Binding(node) => node.apply_bindings(&sb(&[("a", "1")])),
            other => panic!("expected a binding node, got {other}"),
        };
        assert_eq!(got, bind(&[("a", "1")]));
    }

    #[test]
    fn apply_bindings_extends_bound_values() {
        let got = match bind(&[("a", "1")]) {
            Environment::Binding(node) => node.apply_bindings(&sb(&[("b", "2")])),
            other => panic!("expected a binding node, got {other}"),
        };
        assert_eq!(got, bind(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn apply_bindings_conflict_is_an_error() {
        let got = match bind(&[("a", "1")]) {
            Environment::Binding(node) => node.apply_bindings(&sb(&[("a", "2")])),
            other => panic!("expected a binding node, got {other}"),
        };
        assert!(got.is_erroring());
    }

    #[test]
    fn apply_bindings_resolves_references_alongside_bound_values() {
        let env: Environment<RuneToken> = BindingNode::builder()
            .bound(sb(&[("b", "2")]))
            .referenced(sb(&[("a", "1")]))
            .build();
        let got = match env {
            Environment::Binding(node) => node.apply_bindings(&sb(&[("a", "1")])),
            other => panic!("expected a binding node, got {other}"),
        };
        assert_eq!(got, bind(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn binding_combinations() {
        struct Case {
            env: Environment<RuneToken>,
            want_match: bool,
            want_err: bool,
        }
        let cases = [
            Case {
                env: bind(&[("a", "1")]),
                want_match: true,
                want_err: false,
            },
            Case {
                env: bind(&[("a", "1")]).and(&bind(&[("b", "2")])),
                want_match: true,
                want_err: false,
            },
            Case {
                env: bind(&[("a", "1")]).and(&bind(&[("a", "2")])),
                want_match: false,
                want_err: true,
            },
            Case {
                env: bind(&[("a", "1")]).and(&reference(&[("a", "1")])),
                want_match: true,
                want_err: false,
            },
            Case {
                env: bind(&[("a", "1")]).and(&reference(&[("a", "2")])),
                want_match: false,
                want_err: false,
            },
            Case {
                env: bind(&[("a", "1")])
                    .and(&bind(&[("b", "2")]))
                    .and(&reference(&[("a", "1")])),
                want_match: true,
                want_err: false,
            },
            Case {
                env: bind(&[("a", "1")])
                    .and(&bind(&[("b", "2")]))
                    .and(&reference(&[("a", "1")]))
                    .and(&reference(&[("b", "2")])),
                want_match: true,
                want_err: false,
            },
            Case {
                env: bind(&[("a", "1")])
                    .and(&reference(&[("a", "1")]))
                    .and(&reference(&[("b", "2")])),
                want_match: false,
                want_err: false,
            },
            Case {
                env: bind(&[("a", "1")])
                    .and(&bind(&[("b", "2")]))
                    .and(&reference(&[("a", "1")]).or(&reference(&[("b", "2")]))),
                want_match: true,
                want_err: false,
            },
            Case {
                env: bind(&[("a", "1")])
                    .and(&bind(&[("b", "2")]))
                    .and(&bind(&[("b", "2")]))
                    .and(&reference(&[("a", "1")])),
                want_match: true,
                want_err: false,
            },
        ];
        for (idx, case) in cases.iter().enumerate() {
            assert_eq!(
                case.env.matching(),
                case.want_match,
                "case {idx}: {} matching",
                case.env
            );
            assert_eq!(
                case.env.is_erroring(),
                case.want_err,
                "case {idx}: {} erroring",
                case.env
            );
        }
    }

    #[test]
    fn or_collects_captures_from_matching_sides_only() {
        let both = cap(true, &[0]).or(&cap(true, &[1]));
        let got = both.captures();
        assert_eq!(got.get(true).len(), 2);

        let one = cap(false, &[0]).or(&cap(true, &[1]));
        let got = one.captures();
        assert_eq!(got.get(true).len(), 1);
        assert!(got.get(true).contains(&RuneToken::new('c', 1)));
    }

    #[test]
    fn equal_capture_nodes_merge() {
        let merged = cap(true, &[0]).or(&cap(true, &[1]));
        match merged {
            Environment::Binding(node) => {
                assert_eq!(node.caps().get(true).len(), 2);
            }
            other => panic!("expected merged binding node, got {other}"),
        }
    }

    #[test]
    fn references_block_matching() {
        let env = reference(&[("a", "1")]);
        assert!(!env.matching());
        assert!(!env.reducible());
    }

    #[test]
    fn negation_keeps_bindings_and_references() {
        let env = bind(&[("a", "1")]).not();
        match &env {
            Environment::Binding(node) => {
                assert!(!node.matching());
                assert_eq!(node.bound(), &sb(&[("a", "1")]));
            }
            other => panic!("expected binding node, got {other}"),
        }
        assert_eq!(env.not(), bind(&[("a", "1")]));
    }

    #[test]
    fn de_morgan_on_binding_environments() {
        let a = bind(&[("a", "1")]);
        let b = cap(true, &[3]);
        let direct = a.or(&b);
        let via_not = a.not().and(&b.not()).not();
        assert_eq!(direct.matching(), via_not.matching());
        assert_eq!(direct.bindings(), via_not.bindings());
    }
}
