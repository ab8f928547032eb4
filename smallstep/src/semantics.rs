//! Rule registration, priority dispatch, and the open-recursion protocol.
//!
//! Role
//! - A [`Semantics`] is an immutable, priority-ordered table of SOS rules.
//!   Evaluating a term scans the table in registration order, runs the first
//!   rule whose predicate accepts the term, and returns that transform's
//!   outcomes verbatim; later rules are never consulted. No rule matching is
//!   the normal encoding of a stuck/terminal term and yields an empty
//!   sequence, not an error.
//! - Transforms receive a `&dyn` [`Evaluator`] alongside the term, so a rule
//!   can recursively evaluate sub-terms through the very dispatcher that
//!   invoked it (open recursion), or through a mock when unit-tested in
//!   isolation.
//!
//! Type parameters
//! - `I`: the input term payload. `L`: the transition label. `R`: the
//!   successor payload. Big-step style consumers may pick `R ≠ I` (e.g.
//!   evaluating syntax trees down to plain numbers); small-step exploration
//!   requires `R = I` (see [`SmallStepSemantics`](crate::explore::SmallStepSemantics)).
//!
//! Lifecycle
//! - Rules are registered through [`SemanticsBuilder`] and frozen by
//!   [`SemanticsBuilder::build`]; evaluation can therefore never observe a
//!   half-registered table. Predicates need not be mutually exclusive;
//!   registration order disambiguates.
//!
//! Example
//! ```
//! use smallstep::prelude::*;
//!
//! let sem: Semantics<u32, &str, u32> = Semantics::builder()
//!     .add_rule(
//!         |t: &Term<u32>| t.get() == Some(&0),
//!         |_rec, _t| std::iter::once(("zero", Term::new(0))).collect(),
//!     )
//!     .add_rule(
//!         |t: &Term<u32>| t.get().is_some(),
//!         |_rec, _t| std::iter::once(("nonzero", Term::new(1))).collect(),
//!     )
//!     .build();
//!
//! // Both predicates accept 0; the earliest registered rule wins.
//! assert_eq!(sem.evaluate(&Term::new(0))[0].0, "zero");
//! // Nothing accepts the absent handle: stuck, represented by no outcomes.
//! assert!(sem.evaluate(&Term::absent()).is_empty());
//! ```
use log::trace;
use smallvec::SmallVec;

use crate::term::Term;

/// Ordered outcome sequence of one evaluation step: (label, successor) pairs.
///
/// Small fan-outs (the common case) stay inline; combinatorial rules such as
/// cross-branch synchronization may spill to the heap unbounded.
pub type Outcomes<L, R> = SmallVec<[(L, Term<R>); 4]>;

/// Applicability test of a single rule.
pub type Predicate<I> = Box<dyn Fn(&Term<I>) -> bool>;

/// Transform of a single rule. The first argument is the sub-evaluator the
/// transform may recurse through; the engine passes the owning dispatcher.
pub type Transform<I, L, R> = Box<dyn Fn(&dyn Evaluator<I, L, R>, &Term<I>) -> Outcomes<L, R>>;

/// One-step evaluation of terms into labeled successor sequences.
///
/// [`Semantics`] is the canonical implementation; tests can substitute a
/// canned evaluator to exercise a single transform in isolation.
pub trait Evaluator<I, L, R> {
    /// Evaluate one term. An empty result means the term is stuck.
    fn evaluate(&self, term: &Term<I>) -> Outcomes<L, R>;
}

struct Rule<I, L, R> {
    applies: Predicate<I>,
    transform: Transform<I, L, R>,
}

/// Registration phase of a rule table.
///
/// Append rules in decreasing priority with [`add_rule`](Self::add_rule),
/// then freeze the table with [`build`](Self::build). There is no way to add
/// a rule to a built [`Semantics`].
pub struct SemanticsBuilder<I, L, R> {
    rules: Vec<Rule<I, L, R>>,
}

impl<I, L, R> SemanticsBuilder<I, L, R> {
    pub fn new() -> Self {
        SemanticsBuilder { rules: Vec::new() }
    }

    /// Append a rule. Priority is insertion order: earlier rules shadow later
    /// ones wherever their predicates overlap.
    pub fn add_rule<P, F>(mut self, applies: P, transform: F) -> Self
    where
        P: Fn(&Term<I>) -> bool + 'static,
        F: Fn(&dyn Evaluator<I, L, R>, &Term<I>) -> Outcomes<L, R> + 'static,
    {
        self.rules.push(Rule {
            applies: Box::new(applies),
            transform: Box::new(transform),
        });
        self
    }

    /// Freeze the registered rules into an immutable dispatch table.
    pub fn build(self) -> Semantics<I, L, R> {
        Semantics {
            rules: self.rules.into_boxed_slice(),
        }
    }
}

impl<I, L, R> Default for SemanticsBuilder<I, L, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable, priority-ordered rule table.
pub struct Semantics<I, L, R> {
    rules: Box<[Rule<I, L, R>]>,
}

impl<I, L, R> Semantics<I, L, R> {
    /// Start registering rules for a new table.
    pub fn builder() -> SemanticsBuilder<I, L, R> {
        SemanticsBuilder::new()
    }

    /// Number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluate one term against the table.
    ///
    /// Scans rules in registration order; the first predicate that accepts
    /// the term selects its transform, which runs with `self` as the
    /// sub-evaluator and whose outcomes are returned unchanged. Sub-terms the
    /// transform evaluates more than once are evaluated more than once; there
    /// is no per-call cache.
    pub fn evaluate(&self, term: &Term<I>) -> Outcomes<L, R> {
        for (index, rule) in self.rules.iter().enumerate() {
            if (rule.applies)(term) {
                trace!("dispatching rule #{index}");
                return (rule.transform)(self, term);
            }
        }
        trace!("no rule applies, term is stuck");
        Outcomes::new()
    }
}

impl<I, L, R> Evaluator<I, L, R> for Semantics<I, L, R> {
    fn evaluate(&self, term: &Term<I>) -> Outcomes<L, R> {
        Semantics::evaluate(self, term)
    }
}
