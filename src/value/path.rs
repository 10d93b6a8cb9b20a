//! String paths into plain JSON values.
//!
//! # Supported Syntax
//!
//! - `name` or `.name` - object member
//! - `0` after a dot, or `[0]` - array index (an object member named "0" on objects)
//! - `['name']` / `["name"]` - object member with arbitrary characters
//!
//! ```
//! use fieldquill::value::path::{parse_value_path, PathSegment};
//!
//! let path = parse_value_path("a.b[0].c").unwrap();
//! assert_eq!(path, vec![
//!     PathSegment::Key("a".to_string()),
//!     PathSegment::Key("b".to_string()),
//!     PathSegment::Index(0),
//!     PathSegment::Key("c".to_string()),
//! ]);
//! ```

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

/// One step of a value path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// The member name this segment selects on an object.
    pub fn to_key(&self) -> String {
        match self {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => index.to_string(),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Errors from parsing a value path or applying it to a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuePathError {
    #[error("value path is empty")]
    Empty,

    #[error("empty segment at position {position}")]
    EmptySegment { position: usize },

    #[error("unexpected '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        position: usize,
        found: char,
        expected: String,
    },

    #[error("unexpected end of path, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("member `{key}` cannot be set on an array")]
    KeyOnArray { key: String },

    #[error("index {index} is too far past the end of an array of length {len}")]
    IndexTooLarge { index: usize, len: usize },
}

/// Parses a dotted/bracketed path.
pub fn parse_value_path(input: &str) -> Result<Vec<PathSegment>, ValuePathError> {
    Parser::new(input).parse()
}

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    fn parse(mut self) -> Result<Vec<PathSegment>, ValuePathError> {
        if self.input.is_empty() {
            return Err(ValuePathError::Empty);
        }

        let mut segments = Vec::new();
        match self.peek() {
            Some('[') => segments.push(self.parse_bracket()?),
            Some('.') => {}
            _ => segments.push(self.parse_dotted()?),
        }

        while let Some(ch) = self.peek() {
            match ch {
                '.' => {
                    self.next();
                    segments.push(self.parse_dotted()?);
                }
                '[' => segments.push(self.parse_bracket()?),
                found => {
                    return Err(ValuePathError::UnexpectedToken {
                        position: self.position(),
                        found,
                        expected: "'.' or '['".to_string(),
                    })
                }
            }
        }

        Ok(segments)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn next(&mut self) -> Option<char> {
        self.chars.next().map(|(_, ch)| ch)
    }

    fn position(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(position, _)| position)
            .unwrap_or(self.input.len())
    }

    fn expect(&mut self, expected: char) -> Result<(), ValuePathError> {
        let position = self.position();
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(found) => Err(ValuePathError::UnexpectedToken {
                position,
                found,
                expected: format!("'{}'", expected),
            }),
            None => Err(ValuePathError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// A name after a dot (or at the start): everything up to the next `.` or `[`.
    fn parse_dotted(&mut self) -> Result<PathSegment, ValuePathError> {
        let position = self.position();
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch == '.' || ch == '[' {
                break;
            }
            name.push(ch);
            self.next();
        }

        if name.is_empty() {
            return Err(ValuePathError::EmptySegment { position });
        }
        Ok(match name.parse::<usize>() {
            Ok(index) if name.bytes().all(|b| b.is_ascii_digit()) => PathSegment::Index(index),
            _ => PathSegment::Key(name),
        })
    }

    /// `[digits]` or `['name']` / `["name"]`.
    fn parse_bracket(&mut self) -> Result<PathSegment, ValuePathError> {
        self.expect('[')?;
        let position = self.position();
        let segment = match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.next();
                let mut name = String::new();
                loop {
                    match self.next() {
                        Some(ch) if ch == quote => break,
                        Some(ch) => name.push(ch),
                        None => {
                            return Err(ValuePathError::UnexpectedEnd {
                                expected: format!("closing {}", quote),
                            })
                        }
                    }
                }
                PathSegment::Key(name)
            }
            Some(_) => {
                let mut digits = String::new();
                while let Some(ch) = self.peek().filter(char::is_ascii_digit) {
                    digits.push(ch);
                    self.next();
                }
                match digits.parse::<usize>() {
                    Ok(index) => PathSegment::Index(index),
                    Err(_) => {
                        return match self.peek() {
                            Some(found) => Err(ValuePathError::UnexpectedToken {
                                position,
                                found,
                                expected: "an index or a quoted name".to_string(),
                            }),
                            None => Err(ValuePathError::UnexpectedEnd {
                                expected: "an index or a quoted name".to_string(),
                            }),
                        }
                    }
                }
            }
            None => {
                return Err(ValuePathError::UnexpectedEnd {
                    expected: "an index or a quoted name".to_string(),
                })
            }
        };
        self.expect(']')?;
        Ok(segment)
    }
}
