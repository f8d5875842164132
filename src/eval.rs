// SPDX: CC0-1.0

use crate::{lex::SubStr, stdlib, Number};
use core::fmt;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperatorTyp {
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

impl OperatorTyp {
    pub const ALL: [Self; 6] = [
        Self::Neg,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Pow,
    ];

    pub const fn precedence(&self) -> i8 {
        match self {
            Self::Add => 2,
            Self::Sub => 2,
            Self::Mul => 3,
            Self::Div => 3,
            Self::Neg => 4,
            Self::Pow => 5,
        }
    }

    pub const fn associativity(&self) -> Associativity {
        use Associativity::{Left, Right};
        match self {
            Self::Neg => Right,
            Self::Add => Left,
            Self::Sub => Left,
            Self::Mul => Left,
            Self::Div => Left,
            Self::Pow => Right,
        }
    }

    /// Prefix operators have no left operand.
    pub const fn is_prefix(&self) -> bool {
        matches!(self, Self::Neg)
    }

    pub const fn fun(&self) -> (&'static str, Fun) {
        match self {
            Self::Neg => ("neg", Fun::new(1, stdlib::neg)),
            Self::Add => ("add", Fun::new(2, stdlib::add)),
            Self::Sub => ("sub", Fun::new(2, stdlib::sub)),
            Self::Mul => ("mul", Fun::new(2, stdlib::mul)),
            Self::Div => ("div", Fun::new(2, stdlib::div)),
            Self::Pow => ("pow", Fun::new(2, stdlib::pow)),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum OperationTyp {
    Operator(OperatorTyp),
    Val(Number),
    Ident,
}

#[derive(Clone, Debug)]
pub struct Operation {
    pub typ: OperationTyp,
    pub loc: SubStr,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.typ {
            OperationTyp::Val(val) => write!(f, "push {val}"),
            OperationTyp::Operator(typ) => write!(f, "call '{}'", typ.fun().0),
            OperationTyp::Ident => write!(f, "call '{}'", self.loc.get()),
        }
    }
}

#[derive(Debug)]
pub enum EvalErrTyp {
    Empty,
    MissingArgs {
        name: IdentKey,
        arity: usize,
        found: usize,
    },
    StackMismatch {
        expected: usize,
        found: usize,
    },
    UndefinedIdent {
        text: SubStr,
    },
    NullVar {
        text: SubStr,
    },
}

impl fmt::Display for EvalErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.typ {
            EvalErrTyp::Empty => write!(f, "cannot evaluate empty program"),

            EvalErrTyp::MissingArgs { name, arity, found } => write!(
                f,
                "function '{name}' requires {arity} argument{s}, but found {found}",
                s = if *arity == 1 { "" } else { "s" }
            ),

            EvalErrTyp::StackMismatch { expected, found } => write!(
                f,
                "expected {expected} value{s} on the stack but found {found}",
                s = if *expected == 1 { "" } else { "s" }
            ),

            EvalErrTyp::UndefinedIdent { text } => write!(f, "undefined identifier '{text}'"),

            EvalErrTyp::NullVar { text } => {
                write!(f, "variable '{text}' is declared but has no value")
            }
        }
    }
}

#[derive(Debug)]
pub struct EvalErr {
    pub typ: EvalErrTyp,
    pub op: Option<Operation>, // if none, associated with end-of-program checking
}

#[derive(Clone, Copy, Debug)]
pub struct Fun {
    pub arity: usize,
    pub fun: fn(&[Number]) -> Number,
}

impl Fun {
    pub const fn new(arity: usize, fun: fn(&[Number]) -> Number) -> Self {
        Self { arity, fun }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Ident {
    Var(Option<Number>),
    Const(Number),
    Fun(Fun),
}

#[derive(Clone, Debug, Eq)]
pub enum IdentKey {
    Arc(SubStr),
    Static(&'static str),
}

impl PartialEq for IdentKey {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl core::hash::Hash for IdentKey {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.get().hash(state)
    }
}

impl IdentKey {
    pub fn get(&self) -> &str {
        match self {
            Self::Arc(s) => s.get(),
            Self::Static(s) => s,
        }
    }
}

impl fmt::Display for IdentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get())
    }
}

impl From<SubStr> for IdentKey {
    fn from(s: SubStr) -> Self {
        Self::Arc(s)
    }
}

impl From<&'static str> for IdentKey {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

/// Symbol table: variables, constants and functions by name.
pub type Idents = HashMap<IdentKey, Ident>;

/// Sets a variable, declaring it if needed.
pub fn bind(idents: &mut Idents, name: impl Into<IdentKey>, val: Number) {
    let key = name.into();
    if let Some(Ident::Var(slot)) = idents.get_mut(&key) {
        *slot = Some(val);
    } else {
        idents.insert(key, Ident::Var(Some(val)));
    }
}

/// Compiled expression in postfix order.
#[derive(Debug)]
pub struct Program {
    pub(crate) ops: Vec<Operation>,
}

impl Program {
    #[inline]
    pub const fn new(ops: Vec<Operation>) -> Self {
        Self { ops }
    }

    #[inline]
    pub fn ops(&self) -> core::slice::Iter<'_, Operation> {
        self.ops.iter()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

pub fn eval(prog: &Program, idents: &Idents, stack: &mut Vec<Number>) -> Result<Number, EvalErr> {
    fn eval_fun(
        stack: &mut Vec<Number>,
        op: &Operation,
        name: impl Into<IdentKey>,
        fun: &Fun,
    ) -> Result<Number, EvalErr> {
        let len = stack.len();
        if len < fun.arity {
            return Err(EvalErr {
                typ: EvalErrTyp::MissingArgs {
                    arity: fun.arity,
                    found: len,
                    name: name.into(),
                },
                op: Some(op.clone()),
            });
        }
        // stack: ...a, b, c, d
        //                 ^^^^ args if arity is 2
        let base = len - fun.arity;
        let val = (fun.fun)(&stack[base..]);
        stack.truncate(base);
        Ok(val)
    }

    if prog.ops.is_empty() {
        return Err(EvalErr {
            typ: EvalErrTyp::Empty,
            op: None,
        });
    }

    stack.clear();

    for op in prog.ops() {
        let val = match op.typ {
            OperationTyp::Operator(typ) => {
                let (name, fun) = typ.fun();
                eval_fun(stack, op, name, &fun)?
            }

            OperationTyp::Val(num) => num,

            OperationTyp::Ident => {
                let sym = op.loc.clone();
                match idents.get(&IdentKey::from(sym.clone())) {
                    Some(Ident::Var(None)) => {
                        return Err(EvalErr {
                            typ: EvalErrTyp::NullVar { text: sym },
                            op: Some(op.clone()),
                        });
                    }
                    Some(Ident::Var(Some(val)) | Ident::Const(val)) => *val,
                    Some(Ident::Fun(fun)) => eval_fun(stack, op, sym, fun)?,
                    None => {
                        return Err(EvalErr {
                            typ: EvalErrTyp::UndefinedIdent { text: sym },
                            op: Some(op.clone()),
                        });
                    }
                }
            }
        };
        stack.push(val);
    }

    match stack.as_slice() {
        [val] => Ok(*val),
        _ => Err(EvalErr {
            typ: EvalErrTyp::StackMismatch {
                expected: 1,
                found: stack.len(),
            },
            op: None,
        }),
    }
}

/// Evaluates for plotting: any failure reads as NaN, same as an undefined
/// result.
pub fn evaluate(prog: &Program, idents: &Idents, stack: &mut Vec<Number>) -> Number {
    eval(prog, idents, stack).unwrap_or(Number::NAN)
}
