//! Tokenizer and grammar for shell input lines.
//!
//! ```text
//! line     := "q" | "clear" | "h" | "ls"... | ...range... | "pt " indices
//! range    := "range" "(" ws? number ws? "," ws? number ws? ")"
//! indices  := index ("," index)*
//! index    := ws? sign? number ws?
//! ```
//!
//! Keywords are matched on the raw line; `range(...)` may appear anywhere in it.
//! Lines that match nothing parse to [`Command::Unrecognized`].

use std::iter::Peekable;
use std::str::CharIndices;

use crate::{InputError, InputErrorKind};

pub const QUIT: &str = "q";
pub const CLEAR: &str = "clear";
pub const HELP: &str = "h";
pub const LIST_PREFIX: &str = "ls";
pub const PUBLISH_TIMES_PREFIX: &str = "pt ";
const RANGE_KEYWORD: &str = "range";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Run of letters or underscores
    Word(&'a str),
    /// Run of ASCII digits
    Number(&'a str),
    /// Run of whitespace
    Space,
    LParen,
    RParen,
    Comma,
    Symbol(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Clear,
    Help,
    List,
    /// Inclusive record range
    Range { start: i64, end: i64 },
    /// Summaries for the given indices, in input order
    PublishTimes(Vec<i64>),
    Unrecognized,
}

pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let token = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            c if c.is_ascii_digit() => {
                let end =
                    consume_while(&mut chars, start + c.len_utf8(), |c| c.is_ascii_digit());
                Token::Number(&input[start..end])
            }
            c if c.is_ascii_whitespace() => {
                consume_while(&mut chars, start + c.len_utf8(), |c| c.is_ascii_whitespace());
                Token::Space
            }
            c if is_word_char(c) => {
                let end = consume_while(&mut chars, start + c.len_utf8(), is_word_char);
                Token::Word(&input[start..end])
            }
            other => Token::Symbol(other),
        };
        tokens.push(token);
    }
    tokens
}

/// Advance past characters matching `pred`, returning the byte offset after the run.
fn consume_while(
    chars: &mut Peekable<CharIndices<'_>>,
    mut end: usize,
    pred: fn(char) -> bool,
) -> usize {
    while let Some(&(i, next)) = chars.peek() {
        if !pred(next) {
            break;
        }
        end = i + next.len_utf8();
        chars.next();
    }
    end
}

fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Parse one input line.
///
/// # Errors
/// Returns [`InputErrorKind::InvalidIndex`] when a recognised command carries a
/// number that does not fit an `i64`, or a `pt` argument that is not an integer.
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    match line {
        QUIT => return Ok(Command::Quit),
        CLEAR => return Ok(Command::Clear),
        HELP => return Ok(Command::Help),
        _ => {}
    }

    if line.starts_with(LIST_PREFIX) {
        return Ok(Command::List);
    }

    if let Some((start, end)) = find_range(&tokenize(line)) {
        let start = parse_int(None, start, "invalid range value")?;
        let end = parse_int(None, end, "invalid range value")?;
        return Ok(Command::Range { start, end });
    }

    if let Some(args) = line.strip_prefix(PUBLISH_TIMES_PREFIX) {
        return parse_indices(args).map(Command::PublishTimes);
    }

    Ok(Command::Unrecognized)
}

/// Locate the first `range(<number>, <number>)` form and return its bounds.
fn find_range<'a>(tokens: &[Token<'a>]) -> Option<(&'a str, &'a str)> {
    tokens.iter().enumerate().find_map(|(i, token)| match token {
        Token::Word(word) if word.ends_with(RANGE_KEYWORD) => {
            let mut cursor = Cursor::new(&tokens[i + 1..]);
            cursor.expect(Token::LParen)?;
            cursor.skip_space();
            let start = cursor.number()?;
            cursor.skip_space();
            cursor.expect(Token::Comma)?;
            cursor.skip_space();
            let end = cursor.number()?;
            cursor.skip_space();
            cursor.expect(Token::RParen)?;
            Some((start, end))
        }
        _ => None,
    })
}

fn parse_indices(args: &str) -> Result<Vec<i64>, InputError> {
    let tokens = tokenize(args);
    tokens
        .split(|t| *t == Token::Comma)
        .map(|group| {
            let invalid = || InputError::new(InputErrorKind::InvalidIndex, "invalid index value");
            let mut cursor = Cursor::new(group);
            cursor.skip_space();
            let sign = match cursor.peek() {
                Some(Token::Symbol(c @ ('-' | '+'))) => {
                    cursor.advance();
                    Some(c)
                }
                _ => None,
            };
            let digits = cursor.number().ok_or_else(invalid)?;
            cursor.skip_space();
            if !cursor.is_done() {
                return Err(invalid());
            }
            parse_int(sign, digits, "invalid index value")
        })
        .collect()
}

fn parse_int(sign: Option<char>, digits: &str, message: &str) -> Result<i64, InputError> {
    let value = match sign {
        Some('-') => format!("-{digits}").parse::<i64>(),
        _ => digits.parse::<i64>(),
    };
    value.map_err(|_| InputError::new(InputErrorKind::InvalidIndex, message))
}

struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn skip_space(&mut self) {
        if self.peek() == Some(Token::Space) {
            self.advance();
        }
    }

    fn expect(&mut self, token: Token<'a>) -> Option<()> {
        if self.peek()? == token {
            self.advance();
            Some(())
        } else {
            None
        }
    }

    fn number(&mut self) -> Option<&'a str> {
        match self.peek()? {
            Token::Number(digits) => {
                self.advance();
                Some(digits)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("range( 1,22)"),
            vec![
                Token::Word("range"),
                Token::LParen,
                Token::Space,
                Token::Number("1"),
                Token::Comma,
                Token::Number("22"),
                Token::RParen,
            ]
        );
        assert_eq!(
            tokenize("pt  -3"),
            vec![
                Token::Word("pt"),
                Token::Space,
                Token::Symbol('-'),
                Token::Number("3"),
            ]
        );
    }

    #[test]
    fn test_exact_keywords() {
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert_eq!(parse_command("clear").unwrap(), Command::Clear);
        assert_eq!(parse_command("h").unwrap(), Command::Help);
        assert_eq!(parse_command("q ").unwrap(), Command::Unrecognized);
        assert_eq!(parse_command("help").unwrap(), Command::Unrecognized);
    }

    #[test]
    fn test_list_is_prefix_match() {
        assert_eq!(parse_command("ls").unwrap(), Command::List);
        assert_eq!(parse_command("ls -la").unwrap(), Command::List);
        assert_eq!(parse_command("ls range(0,1)").unwrap(), Command::List);
        assert_eq!(parse_command(" ls").unwrap(), Command::Unrecognized);
    }

    #[test]
    fn test_range_whitespace_tolerant() {
        for line in ["range(0,1)", "range( 0 , 1 )", "range(\t0,\t1)", "show range(0, 1) now"] {
            assert_eq!(
                parse_command(line).unwrap(),
                Command::Range { start: 0, end: 1 },
                "{line}"
            );
        }
    }

    #[test]
    fn test_malformed_range_is_unrecognized() {
        for line in ["range(0)", "range(-1,2)", "range 0,1", "range(0,1", "range(a,b)", "range()"] {
            assert_eq!(parse_command(line).unwrap(), Command::Unrecognized, "{line}");
        }
    }

    #[test]
    fn test_range_whitespace_is_ascii_only() {
        assert_eq!(
            parse_command("range( 0 ,\u{a0}1)").unwrap(),
            Command::Unrecognized
        );
        assert_eq!(
            parse_command("range(\u{2003}0,1)").unwrap(),
            Command::Unrecognized
        );
        assert_eq!(
            parse_command("range(\r0,\x0c1)").unwrap(),
            Command::Range { start: 0, end: 1 }
        );
    }

    #[test]
    fn test_range_overflow_is_input_error() {
        let err = parse_command("range(0,99999999999999999999)").unwrap_err();
        assert_eq!(err.kind, InputErrorKind::InvalidIndex);
    }

    #[test]
    fn test_publish_times_indices() {
        assert_eq!(
            parse_command("pt 0").unwrap(),
            Command::PublishTimes(vec![0])
        );
        assert_eq!(
            parse_command("pt 3, 1 ,2").unwrap(),
            Command::PublishTimes(vec![3, 1, 2])
        );
        assert_eq!(
            parse_command("pt -1").unwrap(),
            Command::PublishTimes(vec![-1])
        );
        assert_eq!(
            parse_command("pt +2").unwrap(),
            Command::PublishTimes(vec![2])
        );
    }

    #[test]
    fn test_publish_times_invalid_values() {
        for line in ["pt ", "pt x", "pt 1,", "pt 1 2", "pt 1.5", "pt ,1", "pt - 1"] {
            let err = parse_command(line).unwrap_err();
            assert_eq!(err.kind, InputErrorKind::InvalidIndex, "{line}");
            assert_eq!(err.message, "invalid index value");
        }
    }

    #[test]
    fn test_pt_requires_space() {
        assert_eq!(parse_command("pt").unwrap(), Command::Unrecognized);
        assert_eq!(parse_command("pt1").unwrap(), Command::Unrecognized);
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(parse_command("").unwrap(), Command::Unrecognized);
        assert_eq!(parse_command("hello").unwrap(), Command::Unrecognized);
    }
}
