//! Label-indexed transition graphs keyed by structural state identity.
//!
//! Role
//! - [`TransitionGraph`] is the result of a state-space exploration: the set
//!   of expanded states plus, for every non-terminal state, a mapping from
//!   label to the set of structurally-distinct successors. Keys are term
//!   handles compared by value, so two differently-constructed but identical
//!   terms index the same entry.
//!
//! Invariants
//! - No two states in the graph are structurally equal (they are merged on
//!   insertion), and no successor set holds structural duplicates.
//! - Every edge endpoint is itself an expanded state: a stuck successor
//!   still appears in [`states`](TransitionGraph::states), just with no
//!   outgoing transitions.
use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};

use crate::structural::{StructuralEq, StructuralHash};
use crate::term::Term;

/// Reachable LTS of a term: expanded states and their labeled transitions.
#[derive(Debug)]
pub struct TransitionGraph<T, L> {
    states: HashSet<Term<T>>,
    edges: HashMap<Term<T>, HashMap<L, HashSet<Term<T>>>>,
}

impl<T, L> TransitionGraph<T, L>
where
    T: StructuralEq + StructuralHash,
    L: StructuralEq + StructuralHash,
{
    pub(crate) fn new() -> Self {
        TransitionGraph {
            states: HashSet::new(),
            edges: HashMap::new(),
        }
    }

    /// Record a state as expanded. Returns `false` if a structurally equal
    /// state was already present, in which case nothing changes.
    pub(crate) fn mark_expanded(&mut self, state: Term<T>) -> bool {
        self.states.insert(state)
    }

    /// Record the edge `source --label--> successor`, merging structural
    /// duplicates.
    pub(crate) fn record(&mut self, source: Term<T>, label: L, successor: Term<T>) {
        self.edges
            .entry(source)
            .or_default()
            .entry(label)
            .or_default()
            .insert(successor);
    }

    /// All expanded states, terminal ones included.
    pub fn states(&self) -> impl Iterator<Item = &Term<T>> {
        self.states.iter()
    }

    /// Number of structurally-distinct states discovered.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Total number of edges across all states and labels.
    pub fn edge_count(&self) -> usize {
        self.edges
            .values()
            .flat_map(|by_label| by_label.values())
            .map(|successors| successors.len())
            .sum()
    }

    /// Whether a structurally equal state was expanded.
    pub fn contains_state(&self, state: &Term<T>) -> bool {
        self.states.contains(state)
    }

    /// Whether the state was expanded and found stuck (no rule applied).
    pub fn is_terminal(&self, state: &Term<T>) -> bool {
        self.contains_state(state) && !self.edges.contains_key(state)
    }

    /// Label-indexed view of a state's outgoing transitions, if it has any.
    pub fn outgoing(&self, state: &Term<T>) -> Option<&HashMap<L, HashSet<Term<T>>>> {
        self.edges.get(state)
    }

    /// Flattened (label, successor) pairs leaving a state. Empty for
    /// terminal and unknown states alike.
    pub fn transitions<'a>(
        &'a self,
        state: &Term<T>,
    ) -> impl Iterator<Item = (&'a L, &'a Term<T>)> {
        self.edges.get(state).into_iter().flat_map(|by_label| {
            by_label
                .iter()
                .flat_map(|(label, successors)| successors.iter().map(move |s| (label, s)))
        })
    }

    /// Successors of a state under one specific label.
    pub fn successors(&self, state: &Term<T>, label: &L) -> Option<&HashSet<Term<T>>> {
        self.edges.get(state).and_then(|by_label| by_label.get(label))
    }

    /// Export the graph as a [`petgraph`] digraph for further analysis
    /// (dominators, SCCs, visualization, ...). Node weights are the state
    /// handles; edge weights the labels.
    pub fn to_petgraph(&self) -> DiGraph<Term<T>, L>
    where
        L: Clone,
    {
        let mut graph = DiGraph::new();
        let mut index: HashMap<&Term<T>, NodeIndex> = HashMap::new();
        for state in &self.states {
            index.insert(state, graph.add_node(state.clone()));
        }
        for (source, by_label) in &self.edges {
            for (label, successors) in by_label {
                for successor in successors {
                    // Every endpoint is an expanded state, so both lookups hit.
                    if let (Some(&s), Some(&d)) = (index.get(source), index.get(successor)) {
                        graph.add_edge(s, d, label.clone());
                    }
                }
            }
        }
        graph
    }
}

impl<T, L> PartialEq for TransitionGraph<T, L>
where
    T: StructuralEq + StructuralHash,
    L: StructuralEq + StructuralHash,
{
    fn eq(&self, other: &Self) -> bool {
        self.states == other.states && self.edges == other.edges
    }
}

impl<T, L> Eq for TransitionGraph<T, L>
where
    T: StructuralEq + StructuralHash,
    L: StructuralEq + StructuralHash,
{
}
