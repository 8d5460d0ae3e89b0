//! The internal environment: an AND/OR node over two children.

use crate::ltl::bindings::Bindings;
use crate::ltl::captures::Captures;
use crate::ltl::core::Token;
use crate::ltl::environment::Environment;
use std::fmt;
use std::sync::Arc;

/// The logical connective of a [`BinaryNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    And,
    Or,
}

/// An internal environment node combining two children under AND or OR.
///
/// The node rolls up the combined bound values, whether any child still
/// carries references, and the resulting match status; children are shared
/// behind `Arc` so cloning deep trees stays cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryNode<T: Token> {
    kind: BinaryKind,
    left: Arc<Environment<T>>,
    right: Arc<Environment<T>>,
    bound: Bindings,
    has_refs: bool,
    matching: bool,
}

impl<T: Token> BinaryNode<T> {
    /// Builds a node over the two children. `bound` must already be the
    /// combination of the children's bindings; the match status is false
    /// whenever either side still carries references.
    pub(crate) fn new(
        kind: BinaryKind,
        left: Environment<T>,
        right: Environment<T>,
        bound: Bindings,
    ) -> Self {
        let has_refs = left.has_references() || right.has_references();
        let matching = if has_refs {
            false
        } else {
            match kind {
                BinaryKind::And => left.matching() && right.matching(),
                BinaryKind::Or => left.matching() || right.matching(),
            }
        };
        BinaryNode {
            kind,
            left: Arc::new(left),
            right: Arc::new(right),
            bound,
            has_refs,
            matching,
        }
    }

    pub fn kind(&self) -> BinaryKind {
        self.kind
    }

    pub fn left(&self) -> &Environment<T> {
        &self.left
    }

    pub fn right(&self) -> &Environment<T> {
        &self.right
    }

    pub fn matching(&self) -> bool {
        self.matching
    }

    pub(crate) fn bound(&self) -> &Bindings {
        &self.bound
    }

    pub(crate) fn has_references(&self) -> bool {
        self.has_refs
    }

    /// Collects captures from the matching children.
    pub(crate) fn captures(&self) -> Captures<T> {
        let mut caps = Captures::default();
        if self.left.matching() {
            caps = caps.union(&self.left.captures());
        }
        if self.right.matching() {
            caps = caps.union(&self.right.captures());
        }
        caps
    }

    /// Merges the receiver with another node of the same kind when the rolled
    /// up state agrees and the children merge pairwise, in either order.
    pub(crate) fn merge(&self, other: &BinaryNode<T>) -> Option<BinaryNode<T>> {
        if self.kind != other.kind
            || self.matching != other.matching
            || self.has_refs != other.has_refs
            || self.bound != other.bound
        {
            return None;
        }
        let straight = self
            .left
            .merge(&other.left)
            .zip(self.right.merge(&other.right));
        let (left, right) = match straight {
            Some(pair) => pair,
            None => self
                .left
                .merge(&other.right)
                .zip(self.right.merge(&other.left))?,
        };
        Some(BinaryNode {
            kind: self.kind,
            left: Arc::new(left),
            right: Arc::new(right),
            bound: self.bound.clone(),
            has_refs: self.has_refs,
            matching: self.matching,
        })
    }
}

impl<T: Token> fmt::Display for BinaryNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            BinaryKind::And => "BE_AND",
            BinaryKind::Or => "BE_OR",
        };
        write!(
            f,
            "{name}(refs:{}, {}, {}, {})",
            self.has_refs,
            if self.matching { "Matching" } else { "NotMatching" },
            self.left,
            self.right
        )
    }
}
