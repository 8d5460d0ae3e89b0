#![allow(dead_code)]

use oltl::ltl::bindings::{Bindings, BoundValue};
use oltl::ltl::parser::parse_ltl;
use oltl::ltl::{BoxOperator, Environment};
use oltl::text::{self, MatcherConfig, RuneToken};
use std::collections::BTreeSet;

/// Parses an expression with capturing matchers, panicking on failure.
pub fn parse(expr: &str) -> BoxOperator<RuneToken> {
    let generator = text::generator(MatcherConfig {
        capture: true,
        ..MatcherConfig::default()
    });
    parse_ltl(expr, &generator).unwrap_or_else(|err| panic!("failed to parse {expr:?}: {err}"))
}

/// Streams `input` through the expression one character token at a time and
/// returns the final environment. A query that resolves with tokens still
/// pending reports `NotMatching`.
pub fn run(expr: &str, input: &str) -> Environment<RuneToken> {
    let mut op = Some(parse(expr));
    let mut env = Environment::State(false);
    for (index, ch) in input.chars().enumerate() {
        let current = match op.take() {
            Some(current) => current,
            None => return Environment::State(false),
        };
        let (next, step_env) = current.step(&RuneToken::new(ch, index));
        op = next;
        env = step_env;
    }
    env
}

/// The expected outcome of streaming an input through an expression.
#[derive(Debug, Clone)]
pub enum Expect {
    Match {
        bindings: Vec<(&'static str, &'static str)>,
        indices: Vec<usize>,
    },
    NoMatch,
    Error,
}

/// Expects a match with the given bindings and captured token indices.
pub fn m(bindings: &[(&'static str, &'static str)], indices: &[usize]) -> Expect {
    Expect::Match {
        bindings: bindings.to_vec(),
        indices: indices.to_vec(),
    }
}

/// Expects a clean non-match.
pub fn nm() -> Expect {
    Expect::NoMatch
}

/// Expects a non-match carrying a runtime error.
pub fn err() -> Expect {
    Expect::Error
}

pub fn check(expr: &str, input: &str, expect: &Expect) {
    let env = run(expr, input);
    match expect {
        Expect::Error => {
            assert!(
                env.is_erroring(),
                "{expr} <- {input:?}: wanted an error, got {env}"
            );
            assert!(!env.matching(), "{expr} <- {input:?}: errors never match");
        }
        Expect::NoMatch => {
            assert!(
                env.error().is_none(),
                "{expr} <- {input:?}: unexpected error {env}"
            );
            assert!(
                !env.matching(),
                "{expr} <- {input:?}: wanted no match, got {env}"
            );
        }
        Expect::Match { bindings, indices } => {
            assert!(
                env.error().is_none(),
                "{expr} <- {input:?}: unexpected error {env}"
            );
            assert!(
                env.matching(),
                "{expr} <- {input:?}: wanted a match, got {env}"
            );
            let want = Bindings::new(
                bindings
                    .iter()
                    .map(|(key, value)| (key.to_string(), BoundValue::Str(value.to_string()))),
            )
            .expect("bad expected bindings");
            assert_eq!(
                env.bindings(),
                want,
                "{expr} <- {input:?}: wrong bindings in {env}"
            );
            let got: BTreeSet<usize> = env
                .captures()
                .get(true)
                .iter()
                .map(|token| token.index())
                .collect();
            let want_indices: BTreeSet<usize> = indices.iter().copied().collect();
            assert_eq!(
                got, want_indices,
                "{expr} <- {input:?}: wrong captures in {env}"
            );
        }
    }
}
