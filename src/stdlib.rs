// SPDX: CC0-1.0

use crate::{eval::*, Number};
use core::f64::consts;
use std::collections::HashMap; // assumes Number = f64

/// The independent variable.
pub const X: &str = "x";

pub fn standard_idents() -> Idents {
    let mut ret = HashMap::new();

    ret.insert(X.into(), Ident::Var(None));

    // operators
    for op in OperatorTyp::ALL {
        let (name, fun) = op.fun();
        ret.insert(name.into(), Ident::Fun(fun));
    }

    ret.insert("abs".into(), Ident::Fun(Fun::new(1, abs)));
    ret.insert("sqrt".into(), Ident::Fun(Fun::new(1, sqrt)));
    ret.insert("exp".into(), Ident::Fun(Fun::new(1, exp)));
    ret.insert("ln".into(), Ident::Fun(Fun::new(1, ln)));
    ret.insert("log".into(), Ident::Fun(Fun::new(2, log)));
    ret.insert("floor".into(), Ident::Fun(Fun::new(1, floor)));
    ret.insert("ceil".into(), Ident::Fun(Fun::new(1, ceil)));

    // trig
    ret.insert("sin".into(), Ident::Fun(Fun::new(1, sin)));
    ret.insert("cos".into(), Ident::Fun(Fun::new(1, cos)));
    ret.insert("tan".into(), Ident::Fun(Fun::new(1, tan)));
    ret.insert("asin".into(), Ident::Fun(Fun::new(1, arcsin)));
    ret.insert("acos".into(), Ident::Fun(Fun::new(1, arccos)));
    ret.insert("atan".into(), Ident::Fun(Fun::new(1, arctan)));
    ret.insert("arcsin".into(), Ident::Fun(Fun::new(1, arcsin)));
    ret.insert("arccos".into(), Ident::Fun(Fun::new(1, arccos)));
    ret.insert("arctan".into(), Ident::Fun(Fun::new(1, arctan)));
    ret.insert("sinh".into(), Ident::Fun(Fun::new(1, sinh)));
    ret.insert("cosh".into(), Ident::Fun(Fun::new(1, cosh)));
    ret.insert("tanh".into(), Ident::Fun(Fun::new(1, tanh)));

    ret.insert("pi".into(), Ident::Const(consts::PI));
    ret.insert("tau".into(), Ident::Const(consts::TAU));
    ret.insert("e".into(), Ident::Const(consts::E));
    ret
}

// arity is checked by the evaluator, a mismatch here only yields NaN
fn args<const N: usize>(args: &[Number]) -> [Number; N] {
    args.try_into().unwrap_or([Number::NAN; N])
}

pub fn neg(a: &[Number]) -> Number {
    let [x] = args(a);
    -x
}

pub fn add(a: &[Number]) -> Number {
    let [x, y] = args(a);
    x + y
}

pub fn sub(a: &[Number]) -> Number {
    let [x, y] = args(a);
    x - y
}

pub fn mul(a: &[Number]) -> Number {
    let [x, y] = args(a);
    x * y
}

pub fn div(a: &[Number]) -> Number {
    let [x, y] = args(a);
    x / y
}

pub fn pow(a: &[Number]) -> Number {
    let [x, exp] = args(a);
    x.powf(exp)
}

pub fn abs(a: &[Number]) -> Number {
    let [x] = args(a);
    x.abs()
}

pub fn sqrt(a: &[Number]) -> Number {
    let [x] = args(a);
    x.sqrt()
}

pub fn exp(a: &[Number]) -> Number {
    let [x] = args(a);
    x.exp()
}

pub fn ln(a: &[Number]) -> Number {
    let [x] = args(a);
    x.ln()
}

pub fn log(a: &[Number]) -> Number {
    let [x, base] = args(a);
    x.log(base)
}

pub fn floor(a: &[Number]) -> Number {
    let [x] = args(a);
    x.floor()
}

pub fn ceil(a: &[Number]) -> Number {
    let [x] = args(a);
    x.ceil()
}

pub fn sin(a: &[Number]) -> Number {
    let [x] = args(a);
    x.sin()
}

pub fn cos(a: &[Number]) -> Number {
    let [x] = args(a);
    x.cos()
}

pub fn tan(a: &[Number]) -> Number {
    let [x] = args(a);
    x.tan()
}

pub fn arcsin(a: &[Number]) -> Number {
    let [x] = args(a);
    x.asin()
}

pub fn arccos(a: &[Number]) -> Number {
    let [x] = args(a);
    x.acos()
}

pub fn arctan(a: &[Number]) -> Number {
    let [x] = args(a);
    x.atan()
}

pub fn sinh(a: &[Number]) -> Number {
    let [x] = args(a);
    x.sinh()
}

pub fn cosh(a: &[Number]) -> Number {
    let [x] = args(a);
    x.cosh()
}

pub fn tanh(a: &[Number]) -> Number {
    let [x] = args(a);
    x.tanh()
}
