// SPDX: CC0-1.0

use crate::eval::OperatorTyp;
use core::{fmt, iter::Peekable, str::CharIndices};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubStr {
    // shared so every token can point back into the expression text
    src: Arc<String>,
    start: usize,
    len: usize,
}

impl SubStr {
    #[inline]
    pub const fn new(src: Arc<String>, start: usize, len: usize) -> Self {
        Self { src, start, len }
    }

    pub const fn start(&self) -> usize {
        self.start
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self) -> &str {
        &self.src[self.start..self.start + self.len]
    }
}

impl fmt::Display for SubStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokTyp {
    Ident,
    Number,
    Op(OperatorTyp),
    Comma,
    OpenParen,
    CloseParen,

    // unsupported tokens
    XGreater,
    XLess,
    XEqual,
    XPipe,
    XOpenSquareBracket,
    XCloseSquareBracket,
    XOpenCurly,
    XCloseCurly,
}

impl TokTyp {
    pub const fn is_unsupported(&self) -> bool {
        match self {
            Self::Ident
            | Self::Number
            | Self::Op(_)
            | Self::Comma
            | Self::OpenParen
            | Self::CloseParen => false,

            Self::XGreater
            | Self::XLess
            | Self::XEqual
            | Self::XPipe
            | Self::XOpenSquareBracket
            | Self::XCloseSquareBracket
            | Self::XOpenCurly
            | Self::XCloseCurly => true,
        }
    }

    /// Whether a `-` following this token has a left operand.
    const fn ends_operand(&self) -> bool {
        matches!(self, Self::Ident | Self::Number | Self::CloseParen)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tok {
    pub typ: TokTyp,
    pub loc: SubStr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexErrTyp {
    InvalidChar,
    Unsupported(TokTyp),
}

impl fmt::Display for LexErrTyp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar => write!(f, "invalid character"),
            Self::Unsupported(_) => write!(f, "unsupported character"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LexErr {
    pub typ: LexErrTyp,
    pub loc: SubStr,
}

#[derive(Debug)]
pub struct Lexer<'src> {
    src: &'src Arc<String>,
    cur: Peekable<CharIndices<'src>>,
    prev: Option<TokTyp>,
    has_errored: bool, // tells iter to yield None after error
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src Arc<String>) -> Self {
        Self {
            src,
            cur: src.char_indices().peekable(),
            prev: None,
            has_errored: false,
        }
    }

    fn trim_whitespace(&mut self) {
        while self.cur.next_if(|(_, chr)| chr.is_ascii_whitespace()).is_some() {}
    }

    fn single_char(&self, chr: char) -> Option<TokTyp> {
        let typ = match chr {
            '+' => TokTyp::Op(OperatorTyp::Add),
            '-' if self.prev.is_some_and(|p| p.ends_operand()) => TokTyp::Op(OperatorTyp::Sub),
            '-' => TokTyp::Op(OperatorTyp::Neg),
            '*' => TokTyp::Op(OperatorTyp::Mul),
            '/' => TokTyp::Op(OperatorTyp::Div),
            '^' => TokTyp::Op(OperatorTyp::Pow),
            ',' => TokTyp::Comma,
            '(' => TokTyp::OpenParen,
            ')' => TokTyp::CloseParen,

            '>' => TokTyp::XGreater,
            '<' => TokTyp::XLess,
            '=' => TokTyp::XEqual,
            '|' => TokTyp::XPipe,
            '[' => TokTyp::XOpenSquareBracket,
            ']' => TokTyp::XCloseSquareBracket,
            '{' => TokTyp::XOpenCurly,
            '}' => TokTyp::XCloseCurly,
            _ => return None,
        };
        Some(typ)
    }

    /// Consumes the longest run of characters matching `predicate`, returning
    /// its length.
    fn consume_while<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(char) -> bool,
    {
        let mut len = 0;
        // @unicode
        while self.cur.next_if(|(_, chr)| predicate(*chr)).is_some() {
            len += 1;
        }
        len
    }

    fn fail(&mut self, typ: LexErrTyp, idx: usize, chr: char) -> LexErr {
        self.has_errored = true;
        LexErr {
            typ,
            loc: SubStr::new(Arc::clone(self.src), idx, chr.len_utf8()),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Tok, LexErr>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_errored {
            return None;
        }

        self.trim_whitespace();

        let (idx, chr) = self.cur.peek().copied()?;
        let (typ, len) = if let Some(typ) = self.single_char(chr) {
            self.cur.next();
            (typ, 1)
        } else if chr.is_ascii_alphabetic() {
            (TokTyp::Ident, self.consume_while(|c| c.is_ascii_alphabetic()))
        } else if chr.is_ascii_digit() || chr == '.' {
            (
                TokTyp::Number,
                self.consume_while(|c| c.is_ascii_digit() || c == '.'),
            )
        } else {
            return Some(Err(self.fail(LexErrTyp::InvalidChar, idx, chr)));
        };

        if typ.is_unsupported() {
            return Some(Err(self.fail(LexErrTyp::Unsupported(typ), idx, chr)));
        }

        self.prev = Some(typ);
        Some(Ok(Tok {
            typ,
            loc: SubStr::new(Arc::clone(self.src), idx, len),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Result<Vec<(TokTyp, String)>, LexErr> {
        let src = Arc::new(src.to_string());
        Lexer::new(&src)
            .map(|tok| tok.map(|tok| (tok.typ, tok.loc.get().to_string())))
            .collect()
    }

    fn typs(src: &str) -> Vec<TokTyp> {
        lex(src).unwrap().into_iter().map(|(typ, _)| typ).collect()
    }

    #[test]
    fn tokens_and_spans() {
        let toks = lex("sin(x) + 12.5").unwrap();
        let texts: Vec<_> = toks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, ["sin", "(", "x", ")", "+", "12.5"]);
        assert_eq!(toks[5].0, TokTyp::Number);
    }

    #[test]
    fn minus_depends_on_context() {
        use OperatorTyp::{Neg, Sub};
        assert_eq!(typs("-x")[0], TokTyp::Op(Neg));
        assert_eq!(typs("x-1")[1], TokTyp::Op(Sub));
        assert_eq!(typs("x - 1")[1], TokTyp::Op(Sub));
        assert_eq!(typs("(x)-1")[3], TokTyp::Op(Sub));
        assert_eq!(typs("2*-x")[2], TokTyp::Op(Neg));
        assert_eq!(typs("log(x, -2)")[4], TokTyp::Op(Neg));
        assert_eq!(typs("(-x)")[1], TokTyp::Op(Neg));
    }

    #[test]
    fn unsupported_and_invalid() {
        let err = lex("x = 2").unwrap_err();
        assert_eq!(err.typ, LexErrTyp::Unsupported(TokTyp::XEqual));
        assert_eq!(err.loc.start(), 2);

        let err = lex("x # 2").unwrap_err();
        assert_eq!(err.typ, LexErrTyp::InvalidChar);

        let err = lex("x²").unwrap_err();
        assert_eq!(err.typ, LexErrTyp::InvalidChar);
        assert_eq!(err.loc.get(), "²");
    }

    #[test]
    fn stops_after_error() {
        let src = Arc::new(String::from("$ x"));
        let mut lexer = Lexer::new(&src);
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }
}
