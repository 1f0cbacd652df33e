//! Errors surfaced by tree construction, mounting, and re-rendering.

/// Errors that can occur while building, mounting, or re-rendering a tree.
///
/// Every failure is immediate and synchronous; nothing is retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `create` was handed a template that declares an extension of the
    /// intrinsic element variant.
    #[error("cannot extend the intrinsic element variant")]
    ElemNotExtendable,

    /// `replace` was invoked on a fragment. A fragment splices zero or more
    /// host nodes and cannot coherently stand in for a single one.
    #[error("cannot replace an element with a fragment of elements")]
    ReplaceWithFragment,

    /// The base `produce` ran on a constructor-style component that never
    /// overrode it.
    #[error("produce must be overridden in a constructor-style component")]
    ProduceNotOverridden,

    /// `re` was called on a component that has never been mounted.
    #[error("component is not rooted")]
    NotRooted,
}
