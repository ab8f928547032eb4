//! Finite CCS explored into its full labeled transition system: prefix
//! choice, n-ary parallel composition with complementary-action
//! synchronization, and channel restriction.
use std::collections::BTreeMap;
use std::fmt;

use smallstep::prelude::*;

/// Reserved channel for the silent action.
const TAU: &str = ".";

/// A channel offer: `coname` distinguishes the two polarities that can
/// synchronize on the same channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Action {
    coname: bool,
    channel: String,
}

impl Action {
    fn name(channel: &str) -> Self {
        Action {
            coname: false,
            channel: channel.into(),
        }
    }

    fn coname(channel: &str) -> Self {
        Action {
            coname: true,
            channel: channel.into(),
        }
    }

    fn tau() -> Self {
        Action::name(TAU)
    }

    fn is_tau(&self) -> bool {
        self.channel == TAU
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_tau() {
            f.write_str("tau")
        } else if self.coname {
            write!(f, "'{}", self.channel)
        } else {
            f.write_str(&self.channel)
        }
    }
}

/// Inductive cases for finite CCS processes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Process {
    Nil,
    /// Alternative prefixes: `a.P + b.Q + ...`
    Prefix(Vec<(Action, Term<Process>)>),
    /// `P | Q | ...`
    Parallel(Vec<Term<Process>>),
    /// `P \ {a, b, ...}`: transitions on the listed channels are forbidden.
    Restrict(Vec<String>, Term<Process>),
}

const _: () = assert_structural::<Process>();
const _: () = assert_structural::<Action>();

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Process::Nil => f.write_str("0"),
            Process::Prefix(alternatives) => {
                for (i, (action, kont)) in alternatives.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" + ")?;
                    }
                    if kont.get().is_none_or(|p| matches!(p, Process::Nil)) {
                        write!(f, "{action}.{kont}")?;
                    } else {
                        write!(f, "{action}.({kont})")?;
                    }
                }
                Ok(())
            }
            Process::Parallel(branches) => {
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{branch}")?;
                }
                Ok(())
            }
            Process::Restrict(channels, inner) => {
                write!(f, "({inner}) \\ {{{}}}", channels.join(","))
            }
        }
    }
}

fn nil() -> Term<Process> {
    Term::new(Process::Nil)
}

fn prefix(alternatives: Vec<(Action, Term<Process>)>) -> Term<Process> {
    Term::new(Process::Prefix(alternatives))
}

/// Single-prefix sugar: `a.P`.
fn act(action: Action, kont: Term<Process>) -> Term<Process> {
    prefix(vec![(action, kont)])
}

fn parallel(branches: Vec<Term<Process>>) -> Term<Process> {
    Term::new(Process::Parallel(branches))
}

fn restrict(channels: &[&str], inner: Term<Process>) -> Term<Process> {
    Term::new(Process::Restrict(
        channels.iter().map(|c| (*c).to_string()).collect(),
        inner,
    ))
}

fn ccs() -> SmallStepSemantics<Process, Action> {
    SmallStepSemantics::builder()
        // Prefix choice: offer exactly the listed branches, unmodified.
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
        // Parallel composition: interleave every branch's transitions, and
        // synchronize every complementary pair of non-tau offers on the same
        // channel across distinct branch indices into a tau transition.
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
                                result.push((Action::tau(), Term::new(Process::Parallel(next))));
                            }
                        }
                    }
                }
                result
            },
        )
        // Restriction: forbid transitions on the listed channels, forcing
        // the operand to synchronize internally on them instead.
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
        .into()
}

fn print_lts(graph: &TransitionGraph<Process, Action>, root: &Term<Process>) {
    println!("{} states, {} transitions", graph.state_count(), graph.edge_count());
    println!("root: {root}");
    for state in graph.states() {
        for (label, successor) in graph.transitions(state) {
            println!("\t{state}  --{label}-->  {successor}");
        }
    }
    println!();
}

fn main() {
    let semantics = ccs();

    // a.b.0 + b.a.0
    let choice = prefix(vec![
        (Action::name("a"), act(Action::name("b"), nil())),
        (Action::name("b"), act(Action::name("a"), nil())),
    ]);
    let graph = semantics.explore(&choice);
    print_lts(&graph, &choice);

    // a.0 | b.0: no synchronization, the actions are not complementary
    let interleaving = parallel(vec![
        act(Action::name("a"), nil()),
        act(Action::name("b"), nil()),
    ]);
    let graph = semantics.explore(&interleaving);
    print_lts(&graph, &interleaving);

    // (a.0 | 'a.0) \ {a}: only the synchronized tau step survives
    let synchronized = restrict(
        &["a"],
        parallel(vec![
            act(Action::name("a"), nil()),
            act(Action::coname("a"), nil()),
        ]),
    );
    let graph = semantics.explore(&synchronized);
    print_lts(&graph, &synchronized);
}
