//! Sets of values bound to string names.
//!
//! [`Bindings`] is the value carrier for binder and reference matchers: an
//! ordered set of `(key, value)` pairs with unique keys. All operations are
//! pure; mutators return new instances.

use crate::ltl::core::MatchError;
use std::cmp::Ordering;
use std::fmt;

/// A single value bound to a name. Values carry a runtime type tag, so
/// comparing values of different types is an explicit error rather than a
/// silent inequality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    Str(String),
    Int(i64),
}

impl BoundValue {
    /// Returns the name of the value's runtime type.
    pub fn type_name(&self) -> &'static str {
        match self {
            BoundValue::Str(_) => "string",
            BoundValue::Int(_) => "int",
        }
    }

    /// Compares the receiver's value with the argument's. Values of different
    /// types are incomparable.
    pub fn compare(&self, other: &BoundValue) -> Result<Ordering, MatchError> {
        match (self, other) {
            (BoundValue::Str(a), BoundValue::Str(b)) => Ok(a.cmp(b)),
            (BoundValue::Int(a), BoundValue::Int(b)) => Ok(a.cmp(b)),
            _ => Err(MatchError::TypeMismatch {
                left_type: self.type_name(),
                left: self.to_string(),
                right_type: other.type_name(),
                right: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Str(s) => write!(f, "{s}"),
            BoundValue::Int(i) => write!(f, "{i}"),
        }
    }
}

/// An ordered set of named values with unique keys, stored in increasing key
/// order so that combination and satisfaction are single merge walks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bindings {
    bound: Vec<(String, BoundValue)>,
}

impl Bindings {
    /// Returns a new `Bindings` over the provided pairs. Binding the same key
    /// twice is an error, even to equal values.
    pub fn new(
        values: impl IntoIterator<Item = (String, BoundValue)>,
    ) -> Result<Self, MatchError> {
        let mut bound: Vec<(String, BoundValue)> = values.into_iter().collect();
        bound.sort_by(|a, b| a.0.cmp(&b.0));
        for pair in bound.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(MatchError::KeyConflict {
                    key: pair[0].0.clone(),
                    left: pair[0].1.to_string(),
                    right: pair[1].1.to_string(),
                });
            }
        }
        Ok(Bindings { bound })
    }

    /// Returns a `Bindings` holding a single pair.
    pub fn single(key: impl Into<String>, value: BoundValue) -> Self {
        Bindings {
            bound: vec![(key.into(), value)],
        }
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Returns the value bound to `key`, if any.
    pub fn get(&self, key: &str) -> Option<&BoundValue> {
        self.bound
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|idx| &self.bound[idx].1)
    }

    /// Iterates the set of bound names, in increasing order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bound.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoundValue)> {
        self.bound.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Combines the receiver and argument keywise. If the same key is bound
    /// in both with differing (or incomparable) values, combination fails.
    ///
    /// A conflict is only possible when two concrete bindings actually meet
    /// in one combination; bindings living on branches that never combine do
    /// not conflict.
    pub fn combine(&self, other: &Bindings) -> Result<Bindings, MatchError> {
        if self.is_empty() || self == other {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        let mut bound = Vec::with_capacity(self.len() + other.len());
        let mut a = 0;
        let mut b = 0;
        while a < self.len() && b < other.len() {
            let (ak, av) = &self.bound[a];
            let (bk, bv) = &other.bound[b];
            match ak.cmp(bk) {
                Ordering::Less => {
                    bound.push((ak.clone(), av.clone()));
                    a += 1;
                }
                Ordering::Greater => {
                    bound.push((bk.clone(), bv.clone()));
                    b += 1;
                }
                Ordering::Equal => {
                    if av.compare(bv)? != Ordering::Equal {
                        return Err(MatchError::KeyConflict {
                            key: ak.clone(),
                            left: av.to_string(),
                            right: bv.to_string(),
                        });
                    }
                    bound.push((ak.clone(), av.clone()));
                    a += 1;
                    b += 1;
                }
            }
        }
        bound.extend(self.bound[a..].iter().cloned());
        bound.extend(other.bound[b..].iter().cloned());
        Ok(Bindings { bound })
    }

    /// Attempts to satisfy the receiver against the argument, returning the
    /// relative complement: a copy of the receiver with every key that is
    /// present in both (and agrees in value) removed. Returns `None` if any
    /// key present in both binds to differing or incomparable values.
    pub fn satisfy(&self, other: &Bindings) -> Option<Bindings> {
        if self.is_empty() || other.is_empty() {
            return Some(self.clone());
        }
        if self == other {
            return Some(Bindings::default());
        }
        let mut bound = Vec::with_capacity(self.len());
        let mut a = 0;
        let mut b = 0;
        while a < self.len() && b < other.len() {
            let (ak, av) = &self.bound[a];
            let (bk, bv) = &other.bound[b];
            match ak.cmp(bk) {
                Ordering::Less => {
                    bound.push((ak.clone(), av.clone()));
                    a += 1;
                }
                Ordering::Greater => {
                    b += 1;
                }
                Ordering::Equal => {
                    match av.compare(bv) {
                        Ok(Ordering::Equal) => {}
                        _ => return None,
                    }
                    a += 1;
                    b += 1;
                }
            }
        }
        bound.extend(self.bound[a..].iter().cloned());
        Some(Bindings { bound })
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .bound
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect();
        write!(f, "[{}]", rendered.join(", "))
    }
}
