//! Shared, possibly-absent term handles compared by structure.
//!
//! Role
//! - [`Term<T>`] is the handle the engine passes to rule predicates and
//!   transforms and uses as the state key in transition graphs. It shares the
//!   underlying term tree (cloning a handle never clones the tree) and admits
//!   an explicit absent case, so a rule set can give "no value" its own
//!   semantics instead of panicking on it.
//!
//! Equality semantics
//! - Handles compare by the structure of what they point to, never by
//!   address: two independently built trees with identical content are equal.
//! - Absent is equal only to absent, and never to any present value.
//! - Fast path: two handles to the very same allocation short-circuit to
//!   `true` without a structural walk.
//!
//! Hashing
//! - Consistent with equality. Absent hashes as a fixed sentinel; present
//!   values mix a presence discriminant with the inner value's hash, keeping
//!   the two cases apart for any non-degenerate hasher.
//!
//! Example
//! ```
//! use smallstep::term::Term;
//!
//! let a = Term::new(("plus", 1u32));
//! let b = Term::new(("plus", 1u32));
//! assert_eq!(a, b); // structural, not address-based
//!
//! let none = Term::<(&str, u32)>::absent();
//! assert_ne!(a, none);
//! assert_eq!(none, Term::absent());
//! ```
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Shared handle to an immutable term tree, or to no term at all.
///
/// Term trees are immutable once constructed; transforms that "modify" a term
/// build a new one, sharing the untouched sub-terms through handles like this
/// one (copy-with-substitution). The engine is single-threaded by contract,
/// so sharing uses [`Rc`].
pub struct Term<T>(Option<Rc<T>>);

impl<T> Term<T> {
    /// Wrap a freshly built term.
    pub fn new(value: T) -> Self {
        Term(Some(Rc::new(value)))
    }

    /// The canonical "no term" handle.
    pub fn absent() -> Self {
        Term(None)
    }

    /// Whether this handle points to no term.
    #[inline]
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Borrow the pointed-to term, if present.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.0.as_deref()
    }
}

impl<T> From<T> for Term<T> {
    fn from(value: T) -> Self {
        Term::new(value)
    }
}

impl<T> Clone for Term<T> {
    /// Cheap: clones the handle, not the tree.
    fn clone(&self) -> Self {
        Term(self.0.clone())
    }
}

impl<T> Default for Term<T> {
    fn default() -> Self {
        Term::absent()
    }
}

impl<T: PartialEq> PartialEq for Term<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            // Quick path: exactly the same allocation
            (Some(a), Some(b)) => Rc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl<T: Eq> Eq for Term<T> {}

impl<T: Hash> Hash for Term<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.0 {
            // Sentinel for the absent case; kept apart from every present hash
            // by the discriminant byte.
            None => state.write_u8(0),
            Some(v) => {
                state.write_u8(1);
                v.hash(state);
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Term<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("Term::absent"),
            Some(v) => f.debug_tuple("Term").field(v).finish(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Term<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => f.write_str("_"),
            Some(v) => v.fmt(f),
        }
    }
}
