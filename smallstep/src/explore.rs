//! State-space exploration driving the dispatcher to a fixed point.
//!
//! Role
//! - [`SmallStepSemantics`] specializes the rule dispatcher to the small-step
//!   shape (successors have the same type as inputs), which is what makes a
//!   transition *graph* possible: every successor can be fed back through the
//!   same rules. [`explore`](SmallStepSemantics::explore) does exactly that,
//!   from a root term until no undiscovered state remains.
//!
//! Traversal
//! - Expansion is driven by an explicit LIFO worklist rather than call-stack
//!   recursion, so wide or deep state spaces cannot exhaust the stack. (Rule
//!   transforms still recurse ordinarily into sub-terms; that depth is
//!   bounded by the term tree, not by the state space.)
//! - Deduplication happens at pop time: a state may be pushed many times but
//!   is expanded at most once, which is also what lets cyclic state spaces
//!   terminate without any separate cycle detection.
//! - The traversal order is depth-first but has no effect on the resulting
//!   graph, which is built from unordered sets and maps.
//!
//! Example
//! ```
//! use smallstep::prelude::*;
//!
//! // Modulo-3 ticker: 0 → 1 → 2 → 0, a closed cycle.
//! let sem = SmallStepSemantics::new(
//!     Semantics::builder()
//!         .add_rule(
//!             |t: &Term<u32>| t.get().is_some(),
//!             |_rec, t| {
//!                 let n = t.get().copied().unwrap_or(0);
//!                 std::iter::once(("tick", Term::new((n + 1) % 3))).collect()
//!             },
//!         )
//!         .build(),
//! );
//!
//! let graph = sem.explore(&Term::new(0));
//! assert_eq!(graph.state_count(), 3); // the cycle closes, exploration stops
//! assert_eq!(graph.edge_count(), 3);
//! ```
use log::{debug, trace};

use crate::graph::TransitionGraph;
use crate::semantics::{Evaluator, Outcomes, Semantics, SemanticsBuilder};
use crate::structural::{StructuralEq, StructuralHash};
use crate::term::Term;

/// A rule table whose successors feed back into the same rules, plus the
/// exploration entry point deriving the reachable LTS of a term.
///
/// Single-step evaluation stays available through [`Evaluator`]; `explore`
/// is the whole-graph entry point. Each `explore` call starts from fresh
/// visited/graph state; nothing accumulates across calls.
pub struct SmallStepSemantics<T, L> {
    semantics: Semantics<T, L, T>,
}

impl<T, L> SmallStepSemantics<T, L> {
    /// Wrap a built rule table.
    pub fn new(semantics: Semantics<T, L, T>) -> Self {
        SmallStepSemantics { semantics }
    }

    /// Start registering rules for the small-step shape (`R = I`).
    pub fn builder() -> SemanticsBuilder<T, L, T> {
        Semantics::builder()
    }
}

impl<T, L> SmallStepSemantics<T, L>
where
    T: StructuralEq + StructuralHash,
    L: StructuralEq + StructuralHash,
{
    /// Derive the transition graph reachable from `root`.
    ///
    /// Terminates iff the structurally-distinct reachable state space is
    /// finite; an infinite space makes this loop forever. That is a
    /// documented property of the contract, not a detectable condition.
    pub fn explore(&self, root: &Term<T>) -> TransitionGraph<T, L> {
        let mut graph = TransitionGraph::new();
        let mut worklist: Vec<Term<T>> = vec![root.clone()];

        while let Some(state) = worklist.pop() {
            // Expand each structurally-distinct state only once, however many
            // paths rediscover it.
            if !graph.mark_expanded(state.clone()) {
                continue;
            }
            let outcomes: Outcomes<L, T> = self.semantics.evaluate(&state);
            trace!("expanded a state with {} outgoing transitions", outcomes.len());
            for (label, successor) in outcomes {
                worklist.push(successor.clone());
                graph.record(state.clone(), label, successor);
            }
        }

        debug!(
            "exploration finished: {} states, {} edges",
            graph.state_count(),
            graph.edge_count()
        );
        graph
    }
}

impl<T, L> From<Semantics<T, L, T>> for SmallStepSemantics<T, L> {
    fn from(semantics: Semantics<T, L, T>) -> Self {
        SmallStepSemantics::new(semantics)
    }
}

impl<T, L> Evaluator<T, L, T> for SmallStepSemantics<T, L> {
    fn evaluate(&self, term: &Term<T>) -> Outcomes<L, T> {
        self.semantics.evaluate(term)
    }
}
