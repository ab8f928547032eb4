//! Unsigned integer arithmetic as a rule set: syntax trees evaluate down to
//! plain numbers (the successor type differs from the input type), and
//! partial operations (negative subtraction, division by zero) are simply
//! stuck rather than faults.
use std::fmt;

use smallstep::prelude::*;
use smallvec::smallvec;

/// Inductive cases for unsigned arithmetic expressions. Operands are term
/// handles and may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NumOp {
    Val(usize),
    Paren(Term<NumOp>),
    Plus(Term<NumOp>, Term<NumOp>),
    Minus(Term<NumOp>, Term<NumOp>),
    Times(Term<NumOp>, Term<NumOp>),
    Div(Term<NumOp>, Term<NumOp>),
}

const _: () = assert_structural::<NumOp>();

impl fmt::Display for NumOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumOp::Val(n) => write!(f, "{n}"),
            NumOp::Paren(e) => write!(f, "({e})"),
            NumOp::Plus(l, r) => write!(f, "({l}) + ({r})"),
            NumOp::Minus(l, r) => write!(f, "({l}) - ({r})"),
            NumOp::Times(l, r) => write!(f, "({l}) * ({r})"),
            NumOp::Div(l, r) => write!(f, "({l}) / ({r})"),
        }
    }
}

fn val(n: usize) -> Term<NumOp> {
    Term::new(NumOp::Val(n))
}

fn paren(e: Term<NumOp>) -> Term<NumOp> {
    Term::new(NumOp::Paren(e))
}

fn plus(l: Term<NumOp>, r: Term<NumOp>) -> Term<NumOp> {
    Term::new(NumOp::Plus(l, r))
}

fn minus(l: Term<NumOp>, r: Term<NumOp>) -> Term<NumOp> {
    Term::new(NumOp::Minus(l, r))
}

fn times(l: Term<NumOp>, r: Term<NumOp>) -> Term<NumOp> {
    Term::new(NumOp::Times(l, r))
}

fn div(l: Term<NumOp>, r: Term<NumOp>) -> Term<NumOp> {
    Term::new(NumOp::Div(l, r))
}

/// Evaluate both operands and combine their first results. Any stuck operand
/// or a `None` from the combiner makes the whole operation stuck.
fn binary<F>(
    rec: &dyn Evaluator<NumOp, &'static str, usize>,
    l: &Term<NumOp>,
    r: &Term<NumOp>,
    label: &'static str,
    combine: F,
) -> Outcomes<&'static str, usize>
where
    F: Fn(usize, usize) -> Option<usize>,
{
    let lhs = rec.evaluate(l);
    let rhs = rec.evaluate(r);
    let (Some((_, lt)), Some((_, rt))) = (lhs.first(), rhs.first()) else {
        return Outcomes::new();
    };
    let (Some(&a), Some(&b)) = (lt.get(), rt.get()) else {
        return Outcomes::new();
    };
    match combine(a, b) {
        Some(value) => smallvec![(label, Term::new(value))],
        None => Outcomes::new(),
    }
}

fn arithmetic() -> Semantics<NumOp, &'static str, usize> {
    Semantics::builder()
        // An absent operand reads as the number zero.
        .add_rule(
            |t: &Term<NumOp>| t.is_absent(),
            |_rec, _t| smallvec![("none", Term::new(0))],
        )
        // A literal is its own value.
        .add_rule(
            |t| matches!(t.get(), Some(NumOp::Val(_))),
            |_rec, t| match t.get() {
                Some(NumOp::Val(n)) => smallvec![("val", Term::new(*n))],
                _ => Outcomes::new(),
            },
        )
        // Parentheses evaluate to whatever they enclose, verbatim.
        .add_rule(
            |t| matches!(t.get(), Some(NumOp::Paren(e)) if !e.is_absent()),
            |rec, t| match t.get() {
                Some(NumOp::Paren(e)) => rec.evaluate(e),
                _ => Outcomes::new(),
            },
        )
        .add_rule(
            |t| matches!(t.get(), Some(NumOp::Plus(l, r)) if !l.is_absent() && !r.is_absent()),
            |rec, t| match t.get() {
                Some(NumOp::Plus(l, r)) => binary(rec, l, r, "PLUS", |a, b| Some(a + b)),
                _ => Outcomes::new(),
            },
        )
        .add_rule(
            |t| matches!(t.get(), Some(NumOp::Times(l, r)) if !l.is_absent() && !r.is_absent()),
            |rec, t| match t.get() {
                Some(NumOp::Times(l, r)) => binary(rec, l, r, "TIMES", |a, b| Some(a * b)),
                _ => Outcomes::new(),
            },
        )
        // No negative numbers: subtraction is only defined for left >= right.
        .add_rule(
            |t| matches!(t.get(), Some(NumOp::Minus(l, r)) if !l.is_absent() && !r.is_absent()),
            |rec, t| match t.get() {
                Some(NumOp::Minus(l, r)) => {
                    binary(rec, l, r, "MINUS", |a, b| (a >= b).then(|| a - b))
                }
                _ => Outcomes::new(),
            },
        )
        // Division by zero is undefined, hence stuck. The "MINUS" label is
        // kept as-is: labels only matter up to equality and hashing.
        .add_rule(
            |t| matches!(t.get(), Some(NumOp::Div(l, r)) if !l.is_absent() && !r.is_absent()),
            |rec, t| match t.get() {
                Some(NumOp::Div(l, r)) => {
                    binary(rec, l, r, "MINUS", |a, b| (b > 0).then(|| a / b))
                }
                _ => Outcomes::new(),
            },
        )
        .build()
}

fn main() {
    let semantics = arithmetic();

    let operations = [
        times(paren(plus(val(1), val(2))), val(3)),
        div(plus(val(1), val(2)), val(3)),
        minus(plus(val(1), val(2)), val(3)),
        minus(plus(val(1), val(2)), val(4)),
        div(plus(val(1), val(2)), val(0)),
    ];

    for op in &operations {
        println!("Operation: {op}");
        let results = semantics.evaluate(op);
        if results.is_empty() {
            println!("\t(stuck: no rule produced a value)");
        }
        for (label, value) in &results {
            println!("\t- {label}: {value}");
        }
        println!();
    }
}
