//! Runtime parser for LTL expressions.
//!
//! The grammar, from loosest to tightest binding:
//!
//! 1. `e LIMIT n` — postfix, non-associative
//! 2. `EVENTUALLY e`, `GLOBALLY e` — prefix
//! 3. `a UNTIL b`, `a RELEASE b` — left-associative
//! 4. `a THEN b`, `a SEQUENCE b` — left-associative
//! 5. `a OR b`, `a AND b` — left-associative
//! 6. `NOT e`, `NEXT e` — prefix
//!
//! Grouping with `( expr )`. Terminals are matcher literals `[...]`
//! (produced by the host's matcher generator) and numeric literals (used
//! only by LIMIT). Prefix temporal operators swallow the widest expression
//! to their right below the LIMIT level, so `EVENTUALLY [a] THEN [b]`
//! parses as `EVENTUALLY(THEN([a],[b]))`; when in doubt, use parentheses.
//!
//! # Example
//!
//! ```
//! use oltl::ltl::parser::parse_ltl;
//! use oltl::text::{self, MatcherConfig};
//!
//! let generator = text::generator(MatcherConfig::default());
//! let op = parse_ltl("[a] THEN EVENTUALLY [b]", &generator).unwrap();
//! assert_eq!(op.to_string(), "THEN([a],EVENTUALLY([b]))");
//! ```

pub mod lex;

pub use lex::{default_keywords, Keyword, Lexeme, Lexer};

use crate::ltl::core::{BoxOperator, MatchError, Token};
use crate::ltl::operators::{
    and, eventually, globally, limit, next, not, or, release, sequence, then, until,
};
use tracing::{debug, trace};

/// An error encountered while lexing or parsing an expression. Offsets are
/// byte offsets into the input string.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A `]` with no opening bracket.
    #[error("unexpected ']' at offset {offset}")]
    UnexpectedCloseBracket { offset: usize },
    /// The input ended inside a construct.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },
    /// A non-keyword run that the keyword table does not recognize.
    #[error("unknown keyword at offsets {start}..{end}")]
    UnknownKeyword { start: usize, end: usize },
    /// A numeric literal that does not fit the numeric type.
    #[error("bad numeric literal at offsets {start}..{end}: {message}")]
    BadNumber {
        start: usize,
        end: usize,
        message: String,
    },
    /// The host matcher generator rejected a `[...]` literal.
    #[error("failed to create matcher ending at offset {offset}: {source}")]
    Matcher {
        offset: usize,
        #[source]
        source: MatchError,
    },
    /// A well-formed token in a position the grammar does not allow.
    #[error("unexpected token {token} at offsets {start}..{end}")]
    UnexpectedToken {
        token: String,
        start: usize,
        end: usize,
    },
}

/// Parses an expression using the default keyword table and the provided
/// matcher generator.
pub fn parse_ltl<T: Token>(
    input: &str,
    generator: &dyn Fn(&str) -> Result<BoxOperator<T>, MatchError>,
) -> Result<BoxOperator<T>, ParseError> {
    let keywords = default_keywords();
    let mut lexer = Lexer::new(&keywords, generator, input);
    parse(&mut lexer)
}

/// Parses an expression from an existing lexer. The lexer remains available
/// afterwards, so callers can report its offsets on error.
pub fn parse<T: Token>(lexer: &mut Lexer<'_, T>) -> Result<BoxOperator<T>, ParseError> {
    trace!("parsing ltl expression");
    let mut parser = Parser {
        lexer,
        peeked: None,
    };
    let op = parser.parse_expression()?;
    match parser.next()? {
        None => {
            debug!(expression = %op, "parsed ltl expression");
            Ok(op)
        }
        Some(lexeme) => Err(parser.unexpected(&lexeme)),
    }
}

struct Parser<'l, 'a, T: Token> {
    lexer: &'l mut Lexer<'a, T>,
    peeked: Option<Option<Lexeme<T>>>,
}

impl<T: Token> Parser<'_, '_, T> {
    fn next(&mut self) -> Result<Option<Lexeme<T>>, ParseError> {
        match self.peeked.take() {
            Some(lexeme) => Ok(lexeme),
            None => self.lexer.next_lexeme(),
        }
    }

    fn peek_keyword(&mut self) -> Result<Option<Keyword>, ParseError> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_lexeme()?);
        }
        match &self.peeked {
            Some(Some(Lexeme::Keyword(keyword))) => Ok(Some(*keyword)),
            _ => Ok(None),
        }
    }

    fn unexpected(&self, lexeme: &Lexeme<T>) -> ParseError {
        ParseError::UnexpectedToken {
            token: lexeme.to_string(),
            start: self.lexer.last_token_start(),
            end: self.lexer.offset(),
        }
    }

    fn parse_expression(&mut self) -> Result<BoxOperator<T>, ParseError> {
        let mut expr = self.parse_until_level()?;
        if self.peek_keyword()? == Some(Keyword::Limit) {
            self.next()?;
            let n = self.expect_number()?;
            expr = limit(n, expr);
        }
        Ok(expr)
    }

    fn parse_until_level(&mut self) -> Result<BoxOperator<T>, ParseError> {
        let mut left = self.parse_then_level()?;
        loop {
            match self.peek_keyword()? {
                Some(Keyword::Until) => {
                    self.next()?;
                    left = until(left, self.parse_then_level()?);
                }
                Some(Keyword::Release) => {
                    self.next()?;
                    left = release(left, self.parse_then_level()?);
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_then_level(&mut self) -> Result<BoxOperator<T>, ParseError> {
        let mut left = self.parse_or_level()?;
        loop {
            match self.peek_keyword()? {
                Some(Keyword::Then) => {
                    self.next()?;
                    left = then(left, self.parse_or_level()?);
                }
                Some(Keyword::Sequence) => {
                    self.next()?;
                    left = sequence(vec![left, self.parse_or_level()?]);
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_or_level(&mut self) -> Result<BoxOperator<T>, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            match self.peek_keyword()? {
                Some(Keyword::Or) => {
                    self.next()?;
                    left = or(left, self.parse_unary()?);
                }
                Some(Keyword::And) => {
                    self.next()?;
                    left = and(left, self.parse_unary()?);
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_unary(&mut self) -> Result<BoxOperator<T>, ParseError> {
        match self.peek_keyword()? {
            Some(Keyword::Not) => {
                self.next()?;
                Ok(not(self.parse_unary()?))
            }
            Some(Keyword::Next) => {
                self.next()?;
                Ok(next(self.parse_unary()?))
            }
            // Prefix temporal operators take the widest operand below LIMIT.
            Some(Keyword::Eventually) => {
                self.next()?;
                Ok(eventually(self.parse_until_level()?))
            }
            Some(Keyword::Globally) => {
                self.next()?;
                Ok(globally(self.parse_until_level()?))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<BoxOperator<T>, ParseError> {
        match self.next()? {
            Some(Lexeme::Matcher(op)) => Ok(op),
            Some(Lexeme::OpenParen) => {
                let expr = self.parse_expression()?;
                match self.next()? {
                    Some(Lexeme::CloseParen) => Ok(expr),
                    Some(other) => Err(self.unexpected(&other)),
                    None => Err(ParseError::UnexpectedEof {
                        offset: self.lexer.offset(),
                    }),
                }
            }
            Some(other) => Err(self.unexpected(&other)),
            None => Err(ParseError::UnexpectedEof {
                offset: self.lexer.offset(),
            }),
        }
    }

    fn expect_number(&mut self) -> Result<i64, ParseError> {
        match self.next()? {
            Some(Lexeme::Num(n)) => Ok(n),
            Some(other) => Err(self.unexpected(&other)),
            None => Err(ParseError::UnexpectedEof {
                offset: self.lexer.offset(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{self, MatcherConfig};
    use pretty_assertions::assert_eq;

    fn parse_to_string(input: &str) -> String {
        let generator = text::generator(MatcherConfig::default());
        parse_ltl(input, &generator)
            .unwrap_or_else(|err| panic!("failed to parse {input:?}: {err}"))
            .to_string()
    }

    fn expect_err<T>(result: Result<T, ParseError>) -> ParseError {
        match result {
            Ok(_) => panic!("expected an error, got Ok"),
            Err(err) => err,
        }
    }

    #[test]
    fn parses_with_documented_precedence() {
        let cases = [
            ("[a] THEN [b] ", "THEN([a],[b])"),
            ("(EVENTUALLY [a]) LIMIT 10 ", "LIMIT(10)(EVENTUALLY([a]))"),
            ("EVENTUALLY [a] LIMIT 10", "LIMIT(10)(EVENTUALLY([a]))"),
            ("EVENTUALLY [a] THEN [b]", "EVENTUALLY(THEN([a],[b]))"),
            ("[a] UNTIL [b] THEN [c]", "UNTIL([a],THEN([b],[c]))"),
            ("[a] THEN [b] UNTIL [c]", "UNTIL(THEN([a],[b]),[c])"),
            (
                "[a] THEN EVENTUALLY [b] THEN [c]",
                "THEN([a],EVENTUALLY(THEN([b],[c])))",
            ),
            ("[a] THEN NOT [b]", "THEN([a],NOT([b]))"),
            ("NOT [a] THEN [b]", "THEN(NOT([a]),[b])"),
            ("NOT [a] AND [b]", "AND(NOT([a]),[b])"),
            ("NEXT [a] OR [b]", "OR(NEXT([a]),[b])"),
            ("[a] SEQUENCE [b] SEQUENCE [c]", "SEQUENCE(SEQUENCE([a],[b]),[c])"),
            ("GLOBALLY [a] UNTIL [b]", "GLOBALLY(UNTIL([a],[b]))"),
            ("[$x<-] THEN [$x]", "THEN([$x<-],[$x])"),
            ("([a] OR [b]) AND [c]", "AND(OR([a],[b]),[c])"),
        ];
        for (input, want) in cases {
            assert_eq!(parse_to_string(input), want, "input: {input:?}");
        }
    }

    #[test]
    fn reports_offsets_for_a_grammar_error() {
        let generator = text::generator(MatcherConfig::default());
        let keywords = default_keywords();
        let mut lexer = Lexer::new(&keywords, &generator, "[a] [b] AND [c]");
        let err = expect_err(parse(&mut lexer));
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert_eq!(lexer.last_token_start(), 4);
        assert_eq!(lexer.offset(), 7);
    }

    #[test]
    fn reports_offsets_for_a_matcher_error() {
        let generator = text::generator(MatcherConfig::default());
        let keywords = default_keywords();
        let mut lexer = Lexer::new(&keywords, &generator, "[$] AND [c]");
        let err = expect_err(parse(&mut lexer));
        assert!(matches!(err, ParseError::Matcher { offset: 3, .. }));
        assert_eq!(lexer.last_token_start(), 0);
        assert_eq!(lexer.offset(), 3);
    }

    #[test]
    fn reports_offsets_for_a_lexing_error() {
        let generator = text::generator(MatcherConfig::default());
        let keywords = default_keywords();
        let mut lexer = Lexer::new(&keywords, &generator, "[a] WHEREUPON [b]");
        let err = expect_err(parse(&mut lexer));
        assert!(matches!(err, ParseError::UnknownKeyword { start: 4, end: 5 }));
        assert_eq!(lexer.last_token_start(), 4);
        assert_eq!(lexer.offset(), 5);
    }

    #[test]
    fn rejects_unbalanced_brackets() {
        let generator = text::generator(MatcherConfig::default());
        let err = expect_err(parse_ltl("[abc", &generator));
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));

        let err = expect_err(parse_ltl("[a] AND ]", &generator));
        assert!(matches!(err, ParseError::UnexpectedCloseBracket { .. }));
    }

    #[test]
    fn rejects_trailing_input() {
        let generator = text::generator(MatcherConfig::default());
        let err = expect_err(parse_ltl("[a] THEN [b] [c]", &generator));
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn rejects_chained_limits() {
        let generator = text::generator(MatcherConfig::default());
        let err = expect_err(parse_ltl("[a] LIMIT 3 LIMIT 4", &generator));
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn rejects_numbers_outside_limit() {
        let generator = text::generator(MatcherConfig::default());
        let err = expect_err(parse_ltl("[a] THEN 3", &generator));
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn rejects_empty_input() {
        let generator = text::generator(MatcherConfig::default());
        let err = expect_err(parse_ltl("", &generator));
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn nested_brackets_reach_the_generator() {
        let generator = text::generator(MatcherConfig::default());
        let op = parse_ltl("[a[b]c]", &generator).unwrap();
        assert_eq!(op.to_string(), "[a[b]c]");
    }
}
