//! Core types and submodules for framing and applying LTL queries.

pub mod binder;
pub mod bindings;
pub mod captures;
pub mod core;
pub mod environment;
pub mod operators;
pub mod parser;

pub use self::core::{step, BoxOperator, MatchError, Operator, Token};
pub use self::environment::Environment;
