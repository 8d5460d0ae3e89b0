//! Sets of tokens captured while matching.
//!
//! Captures are observer-only provenance: they record which tokens
//! participated in a (non-)match but carry no meaning to matching itself.

use crate::ltl::core::Token;
use std::collections::HashSet;

/// Two disjoint sets of captured tokens, keyed by the match polarity under
/// which each token was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captures<T: Token> {
    matching: HashSet<T>,
    non_matching: HashSet<T>,
}

impl<T: Token> Default for Captures<T> {
    fn default() -> Self {
        Captures {
            matching: HashSet::new(),
            non_matching: HashSet::new(),
        }
    }
}

impl<T: Token> Captures<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a token under the given match polarity.
    pub fn capture(&mut self, matching: bool, token: T) {
        if matching {
            self.matching.insert(token);
        } else {
            self.non_matching.insert(token);
        }
    }

    /// Returns the set of tokens captured under the given polarity.
    pub fn get(&self, matching: bool) -> &HashSet<T> {
        if matching {
            &self.matching
        } else {
            &self.non_matching
        }
    }

    /// Returns the union of the receiver and argument, polarity by polarity.
    pub fn union(&self, other: &Captures<T>) -> Captures<T> {
        if self.reducible() {
            return other.clone();
        }
        if other.reducible() {
            return self.clone();
        }
        Captures {
            matching: self.matching.union(&other.matching).cloned().collect(),
            non_matching: self
                .non_matching
                .union(&other.non_matching)
                .cloned()
                .collect(),
        }
    }

    /// Returns a copy with the polarities swapped.
    pub fn not(&self) -> Captures<T> {
        Captures {
            matching: self.non_matching.clone(),
            non_matching: self.matching.clone(),
        }
    }

    /// Returns true if no tokens are captured.
    pub fn reducible(&self) -> bool {
        self.matching.is_empty() && self.non_matching.is_empty()
    }
}
