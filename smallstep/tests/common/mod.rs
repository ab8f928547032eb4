//! Shared consumer rule sets used across the integration suites: the
//! unsigned-arithmetic evaluator and the finite-CCS semantics.
#![allow(dead_code)]

pub mod arith {
    use smallstep::prelude::*;
    use smallvec::smallvec;
    use strum::EnumIs;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs)]
    pub enum NumOp {
        Val(usize),
        Paren(Term<NumOp>),
        Plus(Term<NumOp>, Term<NumOp>),
        Minus(Term<NumOp>, Term<NumOp>),
        Times(Term<NumOp>, Term<NumOp>),
        Div(Term<NumOp>, Term<NumOp>),
    }

    const _: () = assert_structural::<NumOp>();

    pub fn val(n: usize) -> Term<NumOp> {
        Term::new(NumOp::Val(n))
    }

    pub fn paren(e: Term<NumOp>) -> Term<NumOp> {
        Term::new(NumOp::Paren(e))
    }

    pub fn plus(l: Term<NumOp>, r: Term<NumOp>) -> Term<NumOp> {
        Term::new(NumOp::Plus(l, r))
    }

    pub fn minus(l: Term<NumOp>, r: Term<NumOp>) -> Term<NumOp> {
        Term::new(NumOp::Minus(l, r))
    }

    pub fn times(l: Term<NumOp>, r: Term<NumOp>) -> Term<NumOp> {
        Term::new(NumOp::Times(l, r))
    }

    pub fn div(l: Term<NumOp>, r: Term<NumOp>) -> Term<NumOp> {
        Term::new(NumOp::Div(l, r))
    }

    /// Evaluate both operands and combine their first results; stuck
    /// operands or a refused combination make the operation stuck.
    pub fn binary<F>(
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

    /// The unsigned-arithmetic rule set: absent reads as zero, literals are
    /// their own value, parentheses pass through, and the four binary
    /// operators combine the first result of each operand. Subtraction
    /// refuses to go negative and division refuses a zero divisor; both are
    /// stuck rather than errors. DIV reports the "MINUS" label; labels only
    /// matter up to equality and hashing, so it is kept as-is.
    pub fn semantics() -> Semantics<NumOp, &'static str, usize> {
        Semantics::builder()
            .add_rule(
                |t: &Term<NumOp>| t.is_absent(),
                |_rec, _t| smallvec![("none", Term::new(0))],
            )
            .add_rule(
                |t| t.get().is_some_and(NumOp::is_val),
                |_rec, t| match t.get() {
                    Some(NumOp::Val(n)) => smallvec![("val", Term::new(*n))],
                    _ => Outcomes::new(),
                },
            )
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
            .add_rule(
                |t| matches!(t.get(), Some(NumOp::Minus(l, r)) if !l.is_absent() && !r.is_absent()),
                |rec, t| match t.get() {
                    Some(NumOp::Minus(l, r)) => {
                        binary(rec, l, r, "MINUS", |a, b| (a >= b).then(|| a - b))
                    }
                    _ => Outcomes::new(),
                },
            )
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
}

pub mod ccs {
    use std::collections::BTreeMap;

    use smallstep::prelude::*;
    use strum::EnumIs;

    /// Reserved channel for the silent action.
    pub const TAU: &str = ".";

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Action {
        pub coname: bool,
        pub channel: String,
    }

    impl Action {
        pub fn name(channel: &str) -> Self {
            Action {
                coname: false,
                channel: channel.into(),
            }
        }

        pub fn coname(channel: &str) -> Self {
            Action {
                coname: true,
                channel: channel.into(),
            }
        }

        pub fn tau() -> Self {
            Action::name(TAU)
        }

        pub fn is_tau(&self) -> bool {
            self.channel == TAU
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs)]
    pub enum Process {
        Nil,
        Prefix(Vec<(Action, Term<Process>)>),
        Parallel(Vec<Term<Process>>),
        Restrict(Vec<String>, Term<Process>),
    }

    const _: () = assert_structural::<Process>();
    const _: () = assert_structural::<Action>();

    pub fn nil() -> Term<Process> {
        Term::new(Process::Nil)
    }

    pub fn prefix(alternatives: Vec<(Action, Term<Process>)>) -> Term<Process> {
        Term::new(Process::Prefix(alternatives))
    }

    /// Single-prefix sugar: `a.P`.
    pub fn act(action: Action, kont: Term<Process>) -> Term<Process> {
        prefix(vec![(action, kont)])
    }

    pub fn parallel(branches: Vec<Term<Process>>) -> Term<Process> {
        Term::new(Process::Parallel(branches))
    }

    pub fn restrict(channels: &[&str], inner: Term<Process>) -> Term<Process> {
        Term::new(Process::Restrict(
            channels.iter().map(|c| (*c).to_string()).collect(),
            inner,
        ))
    }

    /// The finite-CCS rule set: prefix choice offers its listed branches;
    /// parallel composition interleaves every branch's transitions and
    /// synchronizes complementary non-tau offers on the same channel across
    /// distinct branch indices into tau; restriction filters out transitions
    /// on forbidden channels.
    pub fn semantics() -> Semantics<Process, Action, Process> {
        Semantics::builder()
            .add_rule(
                |t: &Term<Process>| {
                    matches!(t.get(), Some(Process::Prefix(alts)) if !alts.is_empty())
                },
                |_rec, t| match t.get() {
                    Some(Process::Prefix(alternatives)) => alternatives
                        .iter()
                        .map(|(action, kont)| (action.clone(), kont.clone()))
                        .collect(),
                    _ => Outcomes::new(),
                },
            )
            .add_rule(
                |t| matches!(t.get(), Some(Process::Parallel(branches)) if !branches.is_empty()),
                |rec, t| {
                    let Some(Process::Parallel(branches)) = t.get() else {
                        return Outcomes::new();
                    };
                    let mut result = Outcomes::new();
                    // channel -> (coname offers, name offers), each (index, successor)
                    type Offers = (Vec<(usize, Term<Process>)>, Vec<(usize, Term<Process>)>);
                    let mut offers: BTreeMap<String, Offers> = BTreeMap::new();
                    for (i, branch) in branches.iter().enumerate() {
                        for (action, successor) in rec.evaluate(branch) {
                            if !action.is_tau() {
                                let slot = offers.entry(action.channel.clone()).or_default();
                                if action.coname {
                                    slot.0.push((i, successor.clone()));
                                } else {
                                    slot.1.push((i, successor.clone()));
                                }
                            }
                            let mut next = branches.clone();
                            next[i] = successor;
                            result.push((action, Term::new(Process::Parallel(next))));
                        }
                    }
                    for (conames, names) in offers.values() {
                        for (i, co_succ) in conames {
                            for (j, name_succ) in names {
                                if i != j {
                                    let mut next = branches.clone();
                                    next[*i] = co_succ.clone();
                                    next[*j] = name_succ.clone();
                                    result
                                        .push((Action::tau(), Term::new(Process::Parallel(next))));
                                }
                            }
                        }
                    }
                    result
                },
            )
            .add_rule(
                |t| matches!(t.get(), Some(Process::Restrict(channels, _)) if !channels.is_empty()),
                |rec, t| {
                    let Some(Process::Restrict(channels, inner)) = t.get() else {
                        return Outcomes::new();
                    };
                    rec.evaluate(inner)
                        .into_iter()
                        .filter(|(action, _)| !channels.contains(&action.channel))
                        .map(|(action, successor)| {
                            (
                                action,
                                Term::new(Process::Restrict(channels.clone(), successor)),
                            )
                        })
                        .collect()
                },
            )
            .build()
    }

    pub fn small_step() -> SmallStepSemantics<Process, Action> {
        SmallStepSemantics::new(semantics())
    }
}
