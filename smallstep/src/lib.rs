//! Smallstep: a structural operational semantics engine over shared term trees.
//!
//! This crate provides the two mechanisms needed to give a language a
//! small-step semantics and derive the labeled transition system (LTS) of a
//! term:
//! - a priority-ordered rule dispatcher ([`Semantics`](semantics::Semantics))
//!   that turns one term into a sequence of (label, successor) outcomes, where
//!   each rule transform may recursively re-invoke the dispatcher on
//!   sub-terms; and
//! - a state-space explorer ([`SmallStepSemantics`](explore::SmallStepSemantics))
//!   that repeatedly applies the dispatcher from a root term and accumulates a
//!   transition graph deduplicated by structural identity.
//!
//! Terms and labels are consumer-defined: anything satisfying the structural
//! capability contract (see [`structural`]) can be plugged in. States are
//! keyed by value, never by address, so two independently built but
//! structurally identical terms denote the same state.
//!
//! Example
//! ```
//! use smallstep::prelude::*;
//!
//! // A one-rule language: positive counters tick down to zero.
//! let sem = SmallStepSemantics::new(
//!     Semantics::builder()
//!         .add_rule(
//!             |t: &Term<u32>| t.get().is_some_and(|n| *n > 0),
//!             |_rec, t| {
//!                 let n = t.get().copied().unwrap_or(0);
//!                 std::iter::once(("dec", Term::new(n - 1))).collect()
//!             },
//!         )
//!         .build(),
//! );
//!
//! let graph = sem.explore(&Term::new(3));
//! assert_eq!(graph.state_count(), 4); // 3, 2, 1 and the stuck state 0
//! assert!(graph.is_terminal(&Term::new(0)));
//! ```
//!
//! Limitations
//! - Exploration terminates iff the structurally-distinct reachable state
//!   space is finite; an infinite space makes [`explore`](explore::SmallStepSemantics::explore)
//!   run forever. Consumers needing a bound must impose their own budget.
//! - Single-step evaluation is not memoized across the repeated
//!   sub-evaluations a rule combinator may perform; combinators that look at
//!   the same sub-term twice pay for it twice.

/// State-space exploration driving the dispatcher to a fixed point.
pub mod explore;
/// Label-indexed transition graphs keyed by structural state identity.
pub mod graph;
/// Rule registration, priority dispatch, and the open-recursion protocol.
pub mod semantics;
/// Capability contract required of term and label types.
pub mod structural;
/// Shared, possibly-absent term handles compared by structure.
pub mod term;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::explore::SmallStepSemantics;
    pub use crate::graph::TransitionGraph;
    pub use crate::semantics::{Evaluator, Outcomes, Semantics, SemanticsBuilder};
    pub use crate::structural::{StructuralEq, StructuralHash, assert_structural};
    pub use crate::term::Term;
}
