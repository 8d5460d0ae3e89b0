//! A terminal operator matching a literal string.

use crate::ltl::binder::BinderBuilder;
use crate::ltl::bindings::{Bindings, BoundValue};
use crate::ltl::core::{BoxOperator, MatchError, Operator, Token};
use crate::ltl::environment::{BindingNode, Environment};
use crate::text::RuneToken;
use std::fmt;
use std::sync::Arc;

/// Configuration shared by string matchers and the domain's binders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatcherConfig {
    /// Match character case exactly. Defaults to false.
    pub case_sensitive: bool,
    /// Record consumed tokens in the emitted environments. Defaults to
    /// false.
    pub capture: bool,
}

/// A string-matching operator. Strings are matched piecemeal: while the
/// incoming token extends a prefix of the pattern, the continuation matches
/// the remaining suffix; the first difference resolves the query without a
/// match. A `.` in the pattern accepts any single token.
#[derive(Debug, Clone)]
pub struct StringMatcher {
    pattern: String,
    config: MatcherConfig,
}

impl StringMatcher {
    pub fn new(pattern: &str, config: MatcherConfig) -> Self {
        let pattern = if config.case_sensitive {
            pattern.to_string()
        } else {
            pattern.to_lowercase()
        };
        StringMatcher { pattern, config }
    }
}

impl Operator<RuneToken> for StringMatcher {
    fn step(&self, token: &RuneToken) -> (Option<BoxOperator<RuneToken>>, Environment<RuneToken>) {
        if self.pattern.is_empty() || token.is_end_of_input() {
            return (None, Environment::State(false));
        }
        let mut matching = false;
        let mut remainder = "";
        if let Some(rest) = self.pattern.strip_prefix('.') {
            remainder = rest;
            matching = rest.is_empty();
        } else {
            let value = if self.config.case_sensitive {
                token.value().to_string()
            } else {
                token.value().to_lowercase().to_string()
            };
            if let Some(rest) = self.pattern.strip_prefix(&value) {
                remainder = rest;
                matching = rest.is_empty();
            }
        }
        let env = if self.config.capture {
            BindingNode::builder()
                .matching(matching)
                .captured([*token])
                .build()
        } else {
            Environment::State(matching)
        };
        if remainder.is_empty() {
            return (None, env);
        }
        (
            Some(Box::new(StringMatcher {
                pattern: remainder.to_string(),
                config: self.config,
            })),
            env,
        )
    }

    fn reducible(&self) -> bool {
        !self.config.capture
    }
}

impl fmt::Display for StringMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.pattern)
    }
}

/// Returns a matcher generator for the parser: `[$name<-]` produces a
/// binder, `[$name]` a reference, and anything else a [`StringMatcher`] for
/// the bracket content.
pub fn generator(
    config: MatcherConfig,
) -> impl Fn(&str) -> Result<BoxOperator<RuneToken>, MatchError> {
    let binders = BinderBuilder::new(
        config.capture,
        Arc::new(|name: &str, token: &RuneToken| {
            Ok(Bindings::single(
                name,
                BoundValue::Str(token.value().to_string()),
            ))
        }),
    );
    move |source: &str| {
        if let Some(rest) = source.strip_prefix('$') {
            if let Some(name) = rest.strip_suffix("<-") {
                let name = name.trim();
                if name.is_empty() {
                    return Err(MatchError::Matcher(
                        "failed to make binding: no name specified".to_string(),
                    ));
                }
                return Ok(binders.bind(name));
            }
            let name = rest.trim();
            if name.is_empty() {
                return Err(MatchError::Matcher(
                    "failed to make reference: no name specified".to_string(),
                ));
            }
            return Ok(binders.reference(name));
        }
        Ok(Box::new(StringMatcher::new(source, config)))
    }
}
