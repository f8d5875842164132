// SPDX: CC0-1.0

// implementation of shunting yard algorithm by dijkstra (see https://en.wikipedia.org/wiki/Shunting_yard_algorithm)

use crate::{
    eval::{
        self, bind, Associativity, EvalErr, Ident, IdentKey, Idents, Operation, OperationTyp,
        OperatorTyp, Program,
    },
    lex::{LexErr, LexErrTyp, Lexer, SubStr, TokTyp},
    stdlib::X,
    Number,
};
use core::{fmt, num::ParseFloatError};
use std::sync::Arc;

#[derive(Debug)]
pub enum ParseErrTyp {
    LexErr(LexErrTyp),
    ParseNum(ParseFloatError),
    ParenMismatch,
}

impl fmt::Display for ParseErrTyp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LexErr(err) => write!(f, "{err}"),
            Self::ParseNum(err) => write!(f, "invalid number: {err}"),
            Self::ParenMismatch => write!(f, "mismatched parentheses"),
        }
    }
}

#[derive(Debug)]
pub struct ParseErr {
    pub typ: ParseErrTyp,
    pub loc: SubStr,
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at column {} ('{}')",
            self.typ,
            self.loc.start() + 1,
            self.loc
        )
    }
}

impl From<LexErr> for ParseErr {
    fn from(err: LexErr) -> Self {
        Self {
            typ: ParseErrTyp::LexErr(err.typ),
            loc: err.loc,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ShuntOpTyp {
    Operator(OperatorTyp),
    Fun,
    OpenParen,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct ShuntOp {
    typ: ShuntOpTyp,
    loc: SubStr,
}

impl ShuntOp {
    /// `None` for parentheses, which are never popped by precedence.
    fn precedence(&self) -> Option<i8> {
        match self.typ {
            ShuntOpTyp::Operator(op) => Some(op.precedence()),
            // a function without parentheses applies to the next operand only
            ShuntOpTyp::Fun => Some(i8::MAX),
            ShuntOpTyp::OpenParen => None,
        }
    }

    fn into_output(self) -> Option<Operation> {
        let typ = match self.typ {
            ShuntOpTyp::Operator(typ) => OperationTyp::Operator(typ),
            ShuntOpTyp::Fun => OperationTyp::Ident,
            ShuntOpTyp::OpenParen => return None,
        };
        Some(Operation { typ, loc: self.loc })
    }
}

/// Pops operators into `out` until an open parenthesis is on top.
fn drain_to_paren(ops: &mut Vec<ShuntOp>, out: &mut Vec<Operation>) {
    while let Some(op) = ops.last() {
        if op.typ == ShuntOpTyp::OpenParen {
            break;
        }
        out.extend(ops.pop().and_then(ShuntOp::into_output));
    }
}

pub fn parse(lex: Lexer<'_>, idents: &Idents) -> Result<Program, ParseErr> {
    let mut out: Vec<Operation> = Vec::new(); // output
    let mut ops: Vec<ShuntOp> = Vec::new(); // operator stack

    for tok in lex {
        let tok = tok?;
        match tok.typ {
            TokTyp::Number => {
                let num: Number = tok.loc.get().parse().map_err(|err| ParseErr {
                    typ: ParseErrTyp::ParseNum(err),
                    loc: tok.loc.clone(),
                })?;
                out.push(Operation {
                    typ: OperationTyp::Val(num),
                    loc: tok.loc,
                });
            }

            TokTyp::Ident => {
                if let Some(Ident::Fun(_)) = idents.get(&IdentKey::from(tok.loc.clone())) {
                    ops.push(ShuntOp {
                        typ: ShuntOpTyp::Fun,
                        loc: tok.loc,
                    });
                } else {
                    // unknown identifiers are assumed to be variables, and
                    // fail at evaluation if they stay undefined
                    out.push(Operation {
                        typ: OperationTyp::Ident,
                        loc: tok.loc,
                    });
                }
            }

            TokTyp::Op(o1) => {
                // a prefix operator has no left operand to finish off
                if !o1.is_prefix() {
                    while let Some(o2) = ops.last() {
                        let pops = o2.precedence().is_some_and(|p2| {
                            p2 > o1.precedence()
                                || (p2 == o1.precedence()
                                    && o1.associativity() == Associativity::Left)
                        });
                        if !pops {
                            break;
                        }
                        if let Some(op) = ops.pop().and_then(ShuntOp::into_output) {
                            out.push(op);
                        }
                    }
                }
                ops.push(ShuntOp {
                    typ: ShuntOpTyp::Operator(o1),
                    loc: tok.loc,
                });
            }

            TokTyp::Comma => drain_to_paren(&mut ops, &mut out),

            TokTyp::OpenParen => {
                ops.push(ShuntOp {
                    typ: ShuntOpTyp::OpenParen,
                    loc: tok.loc,
                });
            }

            TokTyp::CloseParen => {
                drain_to_paren(&mut ops, &mut out);

                if ops.pop().is_none() {
                    return Err(ParseErr {
                        typ: ParseErrTyp::ParenMismatch,
                        loc: tok.loc,
                    });
                }

                // the parentheses held a function's arguments
                if let Some(ShuntOpTyp::Fun) = ops.last().map(|op| op.typ) {
                    out.extend(ops.pop().and_then(ShuntOp::into_output));
                }
            }

            TokTyp::XGreater
            | TokTyp::XLess
            | TokTyp::XEqual
            | TokTyp::XPipe
            | TokTyp::XOpenSquareBracket
            | TokTyp::XCloseSquareBracket
            | TokTyp::XOpenCurly
            | TokTyp::XCloseCurly => unreachable!("unsupported token survived until parsing"),
        }
    }

    while let Some(op) = ops.pop() {
        if op.typ == ShuntOpTyp::OpenParen {
            return Err(ParseErr {
                typ: ParseErrTyp::ParenMismatch,
                loc: op.loc,
            });
        }
        out.extend(op.into_output());
    }

    Ok(Program::new(out))
}

#[derive(Debug)]
pub enum CompileErr {
    Parse(ParseErr),
    Eval(EvalErr),
}

impl fmt::Display for CompileErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "parse error: {err}"),
            Self::Eval(err) => write!(f, "evaluation error: {err}"),
        }
    }
}

impl From<ParseErr> for CompileErr {
    fn from(err: ParseErr) -> Self {
        Self::Parse(err)
    }
}

impl From<EvalErr> for CompileErr {
    fn from(err: EvalErr) -> Self {
        Self::Eval(err)
    }
}

/// Parses `src` and checks that the result evaluates.
///
/// The check binds `x` to 0 and evaluates once. Only structural problems
/// (stray operands, missing arguments, unknown names) are errors; a
/// non-finite value at 0 is fine.
pub fn compile(src: &Arc<String>, idents: &mut Idents) -> Result<Program, CompileErr> {
    let prog = parse(Lexer::new(src), idents)?;
    bind(idents, X, 0.0);
    eval::eval(&prog, idents, &mut Vec::new())?;
    Ok(prog)
}
