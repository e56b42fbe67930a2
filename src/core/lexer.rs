//! Flat tokenizer for already-compiled source text.
//!
//! The lexer does not understand any grammar. It only separates quoted string
//! literals, names, parentheses and whitespace; everything else is collapsed
//! into `Other` tokens that serve as delimiters for the call extractor.
//! Comments (`//`, `#`, `/* */`) become single `Other` tokens, so quotes
//! inside them never open a literal.
//!
//! Names may be qualified with `::` or `\` (`Lang::get`,
//! `\Illuminate\Support\Facades\Lang::get`), so a static call is a single
//! `Identifier` token followed by `(`.

use super::error::LexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Quoted literal, including its quotes and raw escape sequences.
    StringLiteral,
    /// Bare or qualified name.
    Identifier,
    OpenParen,
    CloseParen,
    Whitespace,
    Other,
}

/// A token borrowed from the lexed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first character in the lexed text.
    pub offset: usize,
}

/// Split `text` into tokens, in source order.
///
/// Fails only on a string literal that is still open at end of input.
pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lexer = Lexer { src: text, pos: 0 };
    let mut tokens = Vec::new();

    while let Some(c) = lexer.peek() {
        let start = lexer.pos;
        let kind = match c {
            '\'' | '"' => {
                lexer.string_literal(c)?;
                TokenKind::StringLiteral
            }
            _ if lexer.at_comment() => {
                lexer.comment();
                TokenKind::Other
            }
            '(' => {
                lexer.bump();
                TokenKind::OpenParen
            }
            ')' => {
                lexer.bump();
                TokenKind::CloseParen
            }
            c if c.is_whitespace() => {
                lexer.eat_while(char::is_whitespace);
                TokenKind::Whitespace
            }
            _ if lexer.at_name_start() => {
                lexer.identifier();
                TokenKind::Identifier
            }
            _ => {
                lexer.bump();
                while let Some(c) = lexer.peek() {
                    if is_delimiter(c)
                        || c.is_whitespace()
                        || lexer.at_name_start()
                        || lexer.at_comment()
                    {
                        break;
                    }
                    lexer.bump();
                }
                TokenKind::Other
            }
        };
        tokens.push(Token {
            kind,
            text: &text[start..lexer.pos],
            offset: start,
        });
    }

    Ok(tokens)
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '\'' | '"' | '(' | ')')
}

fn is_name_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_name_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl Lexer<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// A name starts here, optionally behind a leading namespace separator.
    fn at_name_start(&self) -> bool {
        let mut chars = self.rest().chars();
        match chars.next() {
            Some('\\') => chars.next().is_some_and(is_name_start),
            Some(c) => is_name_start(c),
            None => false,
        }
    }

    /// Length of a `::` or `\` separator at the cursor, if a name follows it.
    fn separator_len(&self) -> Option<usize> {
        let rest = self.rest();
        let len = if rest.starts_with("::") {
            2
        } else if rest.starts_with('\\') {
            1
        } else {
            return None;
        };
        rest[len..]
            .chars()
            .next()
            .filter(|&c| is_name_start(c))
            .map(|_| len)
    }

    fn identifier(&mut self) {
        if self.rest().starts_with('\\') {
            self.pos += 1;
        }
        loop {
            // the leading character may be `$`, which is not a name char
            self.bump();
            self.eat_while(is_name_char);
            match self.separator_len() {
                Some(len) => self.pos += len,
                None => break,
            }
        }
    }

    /// `//` or `#` line comment, or `/* */` block comment, at the cursor.
    ///
    /// `://` (a URL scheme) and `#[` (an attribute) do not open a comment.
    fn at_comment(&self) -> bool {
        let rest = self.rest();
        if rest.starts_with("/*") {
            return true;
        }
        if rest.starts_with("//") {
            return !self.src[..self.pos].ends_with(':');
        }
        rest.starts_with('#') && !rest.starts_with("#[")
    }

    /// Skip a comment. Line comments stop before the newline or a closing `?>` tag.
    fn comment(&mut self) {
        let rest = self.rest();
        let len = if let Some(body) = rest.strip_prefix("/*") {
            body.find("*/").map_or(rest.len(), |end| end + 4)
        } else {
            rest.find(['\n', '\r'])
                .into_iter()
                .chain(rest.find("?>"))
                .min()
                .unwrap_or(rest.len())
        };
        self.pos += len;
    }

    fn string_literal(&mut self, quote: char) -> Result<(), LexError> {
        let start = self.pos;
        self.bump();
        loop {
            match self.bump() {
                None => return Err(LexError { offset: start }),
                Some('\\') => {
                    if self.bump().is_none() {
                        return Err(LexError { offset: start });
                    }
                }
                Some(c) if c == quote => return Ok(()),
                Some(_) => {}
            }
        }
    }
}
