//! # headtohead-registry
//!
//! The two external collaborators of the Head to Head engine, expressed as
//! traits the engine is generic over:
//!
//! 1. **[`AssetRegistry`]**: card ownership, operator approval, transfers,
//!    attributes. [`CardRegistry`] is the in-memory implementation.
//! 2. **[`ResultOracle`]**: turns two attribute sets into a raw verdict.
//!    [`HashResulter`] is the deterministic implementation;
//!    `MockResulter` (feature `test-helpers`) is the scriptable test double.

pub mod oracle;
pub mod registry;

#[cfg(any(test, feature = "test-helpers"))]
pub use oracle::MockResulter;
pub use oracle::{HashResulter, ResultOracle};
pub use registry::{AssetRegistry, CardRegistry};
