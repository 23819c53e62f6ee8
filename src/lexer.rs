//! Tokenizer for RVM assembly source.
//!
//! The lexer owns its source buffer and hands out [`Token`]s, which are plain
//! span records. Text, source line and file name are read back through the
//! lexer that produced the token, so a token is only meaningful while that
//! lexer is alive.
//!
//! Scanning rules, in priority order:
//!
//! 1. end of buffer (or a NUL byte) yields [`TokenKind::Eof`] and ends input;
//! 2. `\n` yields [`TokenKind::Newline`];
//! 3. `,` yields [`TokenKind::Comma`];
//! 4. blanks, `\r`, `[`, `]` and `+` are layout and skipped;
//! 5. `;` starts a comment running to the end of the line;
//! 6. an identifier run (`[A-Za-z0-9_]+`) is a register name, else a
//!    mnemonic, else unknown;
//! 7. anything else is unknown.
//!
//! An unknown token ends input as well; from then on every request returns
//! that same token.

use std::fmt::{self, Write as _};

use serde::Serialize;
use tracing::debug;

use crate::instructions::{register_index, Op};

/// Columns per tab stop, for both scanning and diagnostics.
pub const TAB_STOP: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    None,
    Unknown,
    Eof,
    Newline,
    Comma,
    OpName,
    Reg,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::None => "none",
            TokenKind::Unknown => "unknown",
            TokenKind::Eof => "eof",
            TokenKind::Newline => "newline",
            TokenKind::Comma => "comma",
            TokenKind::OpName => "opname",
            TokenKind::Reg => "reg",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset into the source.
    pub pos: usize,
    pub len: usize,
    /// 1-based.
    pub line: u32,
    /// 1-based, tabs expanded.
    pub col: u32,
    /// Byte offset of the first character of `line`.
    pub line_start: usize,
}

impl Token {
    const NONE: Token = Token { kind: TokenKind::None, pos: 0, len: 0, line: 1, col: 1, line_start: 0 };
}

fn is_ident(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

fn is_layout(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | 0x0B | 0x0C | b'[' | b']' | b'+')
}

fn next_col(col: u32, c: u8) -> u32 {
    if c == b'\t' {
        col + TAB_STOP - (col - 1) % TAB_STOP
    } else {
        col + 1
    }
}

#[derive(Debug)]
pub struct Lexer {
    src: String,
    file: String,
    pos: usize,
    line: u32,
    col: u32,
    line_start: usize,
    end: bool,
    /// Last token returned by `next_token`.
    tok: Token,
    lookahead: Option<Token>,
    /// Last token scanned; repeated forever once `end` is set.
    last: Token,
}

impl Lexer {
    pub fn new(file: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            file: file.into(),
            pos: 0,
            line: 1,
            col: 1,
            line_start: 0,
            end: false,
            tok: Token::NONE,
            lookahead: None,
            last: Token::NONE,
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Whether another call to `next_token` can yield a token not seen yet.
    pub fn is_active(&self) -> bool {
        !self.end || self.lookahead.is_some()
    }

    /// The token most recently returned by [`Lexer::next_token`].
    pub fn current(&self) -> Token {
        self.tok
    }

    pub fn next_token(&mut self) -> Token {
        let tok = match self.lookahead.take() {
            Some(t) => t,
            None => self.scan(),
        };
        self.tok = tok;
        tok
    }

    /// Scan the next token without consuming it.
    pub fn peek_token(&mut self) -> Token {
        if let Some(t) = self.lookahead {
            return t;
        }
        if self.end {
            return self.last;
        }
        let t = self.scan();
        self.lookahead = Some(t);
        t
    }

    /// Iterate over the remaining tokens, terminal token included.
    pub fn tokens(&mut self) -> Tokens<'_> {
        Tokens { lexer: self }
    }

    pub fn text(&self, tok: &Token) -> &str {
        self.src.get(tok.pos..tok.pos + tok.len).unwrap_or("")
    }

    /// The source line holding `tok`, without its line terminator.
    pub fn source_line(&self, tok: &Token) -> &str {
        let rest = self.src.get(tok.line_start..).unwrap_or("");
        let end = rest.find(['\n', '\r', '\0']).unwrap_or(rest.len());
        &rest[..end]
    }

    /// Render `tok` under its source line with a caret marker, optionally
    /// preceded by `file: message`.
    pub fn render(&self, tok: &Token, message: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(msg) = message {
            let _ = writeln!(out, "{}: {}", self.file, msg);
        }
        let _ = write!(out, "{:5} | ", tok.line);
        let mut col = 1;
        for ch in self.source_line(tok).chars() {
            if ch == '\t' {
                let next = next_col(col, b'\t');
                out.extend(std::iter::repeat(' ').take((next - col) as usize));
                col = next;
            } else {
                out.push(ch);
                col += 1;
            }
        }
        out.push('\n');
        out.push_str("      | ");
        out.extend(std::iter::repeat(' ').take(tok.col.saturating_sub(1) as usize));
        out.extend(std::iter::repeat('^').take(self.text(tok).chars().count().max(1)));
        out.push('\n');
        out
    }

    fn peek_byte(&self) -> u8 {
        self.src.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    fn bump(&mut self) {
        let Some(&c) = self.src.as_bytes().get(self.pos) else { return };
        self.pos += 1;
        match c {
            b'\n' => {
                self.line += 1;
                self.line_start = self.pos;
                self.col = 1;
            }
            b'\r' => self.col = 1,
            _ => self.col = next_col(self.col, c),
        }
    }

    fn scan(&mut self) -> Token {
        if self.end {
            return self.last;
        }

        let tok = loop {
            let mut tok = Token {
                kind: TokenKind::Unknown,
                pos: self.pos,
                len: 0,
                line: self.line,
                col: self.col,
                line_start: self.line_start,
            };
            match self.peek_byte() {
                0 => {
                    tok.kind = TokenKind::Eof;
                    self.end = true;
                    break tok;
                }
                b'\n' => {
                    self.bump();
                    tok.kind = TokenKind::Newline;
                    tok.len = 1;
                    break tok;
                }
                b',' => {
                    self.bump();
                    tok.kind = TokenKind::Comma;
                    tok.len = 1;
                    break tok;
                }
                c if is_layout(c) => {
                    while is_layout(self.peek_byte()) {
                        self.bump();
                    }
                }
                b';' => {
                    while !matches!(self.peek_byte(), b'\n' | 0) {
                        self.bump();
                    }
                }
                c if is_ident(c) => {
                    while is_ident(self.peek_byte()) {
                        self.bump();
                        tok.len += 1;
                    }
                    let text = &self.src[tok.pos..tok.pos + tok.len];
                    if register_index(text).is_some() {
                        tok.kind = TokenKind::Reg;
                    } else if Op::from_mnemonic(text).is_some() {
                        tok.kind = TokenKind::OpName;
                    } else {
                        debug!(file = %self.file, line = tok.line, col = tok.col, ident = text, "unrecognized identifier");
                        self.end = true;
                    }
                    break tok;
                }
                _ => {
                    tok.len = self.src[tok.pos..].chars().next().map_or(1, char::len_utf8);
                    debug!(file = %self.file, line = tok.line, col = tok.col, "unrecognized character");
                    self.end = true;
                    break tok;
                }
            }
        };

        self.last = tok;
        tok
    }
}

pub struct Tokens<'a> {
    lexer: &'a mut Lexer,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.lexer.is_active() {
            Some(self.lexer.next_token())
        } else {
            None
        }
    }
}
