//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{types,core,host}` so binaries,
//! integration tests and benchmarks depend on a single package.

pub use blockfall_core as core;
pub use blockfall_host as host;
pub use blockfall_types as types;
