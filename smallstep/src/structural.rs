//! Capability contract required of term and label types.
//!
//! Role
//! - The engine keys states and labels by value. Any type used as a state or
//!   a label must therefore carry structural equality and a hash consistent
//!   with it. These traits name that contract so it shows up in signatures
//!   and fails at compile time, not at run time: a type lacking the
//!   capabilities is a build error at the call site, never a recoverable
//!   fault.
//!
//! Contract
//! - [`StructuralEq`]: reflexive, symmetric, transitive equality computed
//!   from content and shape. Absent handles (see [`Term`](crate::term::Term))
//!   are equal only to absent handles.
//! - [`StructuralHash`]: equal values hash equal. Collisions among distinct
//!   present values are tolerated; hashing is a performance aid for
//!   set/map membership, never a substitute for equality.
use std::hash::Hash;

/// Structural equality capability. Blanket-implemented for every `Eq` type;
/// the dedicated name documents that the equality must be value-based.
pub trait StructuralEq: Eq {}

impl<T: Eq + ?Sized> StructuralEq for T {}

/// Structural hashing capability, consistent with [`StructuralEq`].
pub trait StructuralHash: Hash {}

impl<T: Hash + ?Sized> StructuralHash for T {}

/// Compile-time probe that a type is usable as a state key or label.
///
/// Mention it in a `const` item next to a consumer's term definition to get
/// the capability failure at the definition rather than at first use:
/// ```
/// use smallstep::structural::assert_structural;
///
/// #[derive(PartialEq, Eq, Hash)]
/// enum Tag { On, Off }
///
/// const _: () = assert_structural::<Tag>();
/// ```
pub const fn assert_structural<T: StructuralEq + StructuralHash>() {}

/// Equality-only probe, for label-less payload types.
pub const fn assert_structural_eq<T: StructuralEq>() {}

/// Hash-only probe.
pub const fn assert_structural_hash<T: StructuralHash>() {}
