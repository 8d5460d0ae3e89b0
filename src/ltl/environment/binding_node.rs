//! The leaf environment: bound values, references, and captured tokens.

use crate::ltl::bindings::Bindings;
use crate::ltl::captures::Captures;
use crate::ltl::core::Token;
use crate::ltl::environment::Environment;
use std::fmt;

/// A leaf environment carrying a set of bound key-value pairs, a set of
/// referenced pairs still awaiting satisfaction, and captured tokens.
///
/// A node with outstanding references never reports itself matching: a
/// reference is an obligation, not a claim, and stays pending until a
/// binding for the same name arrives (or contradicts it) higher in the
/// environment tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingNode<T: Token> {
    matching: bool,
    bound: Bindings,
    referenced: Bindings,
    caps: Captures<T>,
}

impl<T: Token> BindingNode<T> {
    /// Returns a builder for a new node. The default node is matching with no
    /// bound or referenced values and no captures.
    pub fn builder() -> BindingNodeBuilder<T> {
        BindingNodeBuilder {
            matching: true,
            bound: Bindings::default(),
            referenced: Bindings::default(),
            caps: Captures::default(),
        }
    }

    /// Returns false for any node with references, since these are still
    /// pending, and otherwise the node's match status.
    pub fn matching(&self) -> bool {
        if self.has_references() {
            return false;
        }
        self.matching
    }

    /// Returns true for nodes with no bound values, references, or captures.
    pub fn reducible(&self) -> bool {
        self.bound.is_empty() && self.referenced.is_empty() && self.caps.reducible()
    }

    pub(crate) fn bound(&self) -> &Bindings {
        &self.bound
    }

    pub(crate) fn caps(&self) -> &Captures<T> {
        &self.caps
    }

    pub(crate) fn has_references(&self) -> bool {
        !self.referenced.is_empty()
    }

    /// Returns the NOT of the receiver: match status and capture polarity
    /// flip, while bound and referenced values persist. Bindings are
    /// commitments made on the way to a match, so negation does not discard
    /// them.
    pub(crate) fn not(&self) -> BindingNode<T> {
        BindingNode {
            matching: !self.matching,
            bound: self.bound.clone(),
            referenced: self.referenced.clone(),
            caps: self.caps.not(),
        }
    }

    /// Applies the provided bindings to the receiver, combining them into the
    /// bound set and attempting to satisfy the referenced set against the
    /// result. Satisfied references are removed; an unsatisfiable reference
    /// flips the node's match status and drops the failed references. A
    /// binding conflict produces an erroring environment.
    pub(crate) fn apply_bindings(&self, bindings: &Bindings) -> Environment<T> {
        if bindings.is_empty() {
            return Environment::Binding(self.clone());
        }
        let bound = match self.bound.combine(bindings) {
            Ok(bound) => bound,
            Err(err) => return Environment::Error(err),
        };
        if !self.has_references() {
            if self.bound == bound {
                return Environment::Binding(self.clone());
            }
            return Environment::Binding(BindingNode {
                matching: self.matching,
                bound,
                referenced: Bindings::default(),
                caps: self.caps.clone(),
            });
        }
        match self.referenced.satisfy(&bound) {
            Some(referenced) => Environment::Binding(BindingNode {
                matching: self.matching,
                bound,
                referenced,
                caps: self.caps.clone(),
            }),
            None => Environment::Binding(BindingNode {
                matching: !self.matching,
                bound,
                referenced: Bindings::default(),
                caps: self.caps.not(),
            }),
        }
    }

    /// Merges the receiver with another node when both agree on match
    /// status, bound values, and references; the merged node's captures are
    /// the union.
    pub(crate) fn merge(&self, other: &BindingNode<T>) -> Option<BindingNode<T>> {
        if self.matching == other.matching
            && self.bound == other.bound
            && self.referenced == other.referenced
        {
            return Some(BindingNode {
                matching: self.matching,
                bound: self.bound.clone(),
                referenced: self.referenced.clone(),
                caps: self.caps.union(&other.caps),
            });
        }
        None
    }
}

impl<T: Token> fmt::Display for BindingNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![format!(
            "{}/{}",
            if self.matching() {
                "Matching"
            } else {
                "NotMatching"
            },
            self.matching
        )];
        if !self.bound.is_empty() {
            parts.push(format!("BIND({})", self.bound));
        }
        if !self.referenced.is_empty() {
            parts.push(format!("REF({})", self.referenced));
        }
        let caps = self.caps.get(self.matching);
        if !caps.is_empty() {
            let mut rendered: Vec<String> = caps.iter().map(|tok| tok.to_string()).collect();
            rendered.sort();
            parts.push(format!("CAP({})", rendered.join(", ")));
        }
        write!(f, "({})", parts.join(", "))
    }
}

/// Builds [`BindingNode`] environments. `build` simplifies contentless nodes
/// to a bare [`Environment::State`] and reduces the bound set against the
/// referenced set so the two never share a key: agreement removes the
/// reference, disagreement inverts the match status.
pub struct BindingNodeBuilder<T: Token> {
    matching: bool,
    bound: Bindings,
    referenced: Bindings,
    caps: Captures<T>,
}

impl<T: Token> BindingNodeBuilder<T> {
    /// Sets the node's match status. Flipping the status also flips the
    /// polarity of captures recorded so far.
    pub fn matching(mut self, matching: bool) -> Self {
        if self.matching != matching {
            self.matching = matching;
            self.caps = self.caps.not();
        }
        self
    }

    /// Captures tokens under the node's current match status.
    pub fn captured(mut self, tokens: impl IntoIterator<Item = T>) -> Self {
        for token in tokens {
            self.caps.capture(self.matching, token);
        }
        self
    }

    /// Sets the node's bound values.
    pub fn bound(mut self, bound: Bindings) -> Self {
        self.bound = bound;
        self
    }

    /// Sets the node's referenced values.
    pub fn referenced(mut self, referenced: Bindings) -> Self {
        self.referenced = referenced;
        self
    }

    pub fn build(self) -> Environment<T> {
        let mut matching = self.matching;
        let mut caps = self.caps;
        let referenced = if self.referenced.is_empty() || self.bound.is_empty() {
            self.referenced
        } else {
            match self.referenced.satisfy(&self.bound) {
                Some(residual) => residual,
                None => {
                    matching = !matching;
                    caps = caps.not();
                    Bindings::default()
                }
            }
        };
        let node = BindingNode {
            matching,
            bound: self.bound,
            referenced,
            caps,
        };
        if node.reducible() {
            return Environment::State(node.matching);
        }
        Environment::Binding(node)
    }
}
