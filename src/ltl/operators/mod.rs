//! Executable LTL operator implementations.
//!
//! This module groups the engine-defined operators:
//! - [`not_operator`] for logical negation,
//! - [`binary_operators`] for logical conjunction/disjunction,
//! - [`deferral_operators`] for holding a resolved sibling's environment,
//! - [`sequence_operators`] for temporal concatenation (`then`, `sequence`),
//! - [`unary_temporal_operators`] for `next`, `limit`, `eventually`, and
//!   `globally`, and
//! - [`until_operator`] for `until` and `release`.
//!
//! Operators are constructed through free functions returning boxed trait
//! objects, so combinators compose without naming concrete types.

pub mod binary_operators;
pub mod deferral_operators;
pub mod not_operator;
pub mod sequence_operators;
pub mod unary_temporal_operators;
pub mod until_operator;

pub use binary_operators::{and, or};
pub use deferral_operators::{and_environment, or_environment};
pub use not_operator::not;
pub use sequence_operators::{sequence, then};
pub use unary_temporal_operators::{eventually, globally, limit, next};
pub use until_operator::{release, until};

use crate::ltl::core::{BoxOperator, Token};
use crate::ltl::environment::Environment;

/// Discards the continuation of a step result whose environment is matching.
/// This lets operators terminate as soon as they have matched, which is
/// required for temporal concatenation after `eventually` or `until` to make
/// progress.
pub(crate) fn stop_at_first_match<T: Token>(
    result: (Option<BoxOperator<T>>, Environment<T>),
) -> (Option<BoxOperator<T>>, Environment<T>) {
    let (continuation, env) = result;
    if env.matching() {
        return (None, env);
    }
    (continuation, env)
}
