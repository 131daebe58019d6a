mod container;
mod instantiate;
mod instantiator;

pub use container::ResolveErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use instantiator::InstantiatorErrorKind;

/// Error of a single invocation: either auto-wiring the arguments failed
/// or the callable body itself did.
pub type InvokeErrorKind = InstantiatorErrorKind<ResolveErrorKind, InstantiateErrorKind>;
