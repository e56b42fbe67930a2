//! Stack-based recognition of `name(...)` calls over a token stream.
//!
//! This is a tolerant scanner, not a parser: it only tracks parentheses that
//! open a call. A `)` always closes the innermost call still open, even when
//! it actually closes a plain grouping paren. Callee filtering happens later
//! in the key decoder.

use super::lexer::{Token, TokenKind};

/// A call whose closing paren has not been seen yet.
#[derive(Debug)]
struct PendingCall<'a> {
    callee: &'a str,
    offset: usize,
    arguments: Vec<&'a str>,
}

/// A call with its string-literal arguments, as raw literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedCall<'a> {
    pub callee: &'a str,
    /// Byte offset of the callee name.
    pub offset: usize,
    pub arguments: Vec<&'a str>,
}

impl<'a> From<PendingCall<'a>> for CompletedCall<'a> {
    fn from(call: PendingCall<'a>) -> Self {
        Self {
            callee: call.callee,
            offset: call.offset,
            arguments: call.arguments,
        }
    }
}

impl<'a> CompletedCall<'a> {
    pub fn first_argument(&self) -> Option<&'a str> {
        self.arguments.first().copied()
    }
}

/// Collect every call in `tokens`, in the order their closing parens appear.
///
/// Calls left open at end of input are dropped.
pub fn extract_calls<'a>(tokens: &[Token<'a>]) -> Vec<CompletedCall<'a>> {
    let mut stack: Vec<PendingCall<'a>> = Vec::new();
    let mut completed = Vec::new();
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        match token.kind {
            TokenKind::Identifier => {
                if iter
                    .next_if(|next| next.kind == TokenKind::OpenParen)
                    .is_some()
                {
                    stack.push(PendingCall {
                        callee: token.text,
                        offset: token.offset,
                        arguments: Vec::new(),
                    });
                }
            }
            TokenKind::StringLiteral => {
                if let Some(top) = stack.last_mut() {
                    top.arguments.push(token.text);
                }
            }
            TokenKind::CloseParen => {
                if let Some(call) = stack.pop() {
                    completed.push(call.into());
                }
            }
            TokenKind::OpenParen | TokenKind::Whitespace | TokenKind::Other => {}
        }
    }

    completed
}
