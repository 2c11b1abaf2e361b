//! Lagoon Navigation Security Gate
//!
//! Every navigation, redirect, popup, and embedded-view creation attempted
//! by the shell's content webviews is classified here before it proceeds.
//! The gate is a pure, synchronous decision function over a fixed host
//! allow-list; it performs no I/O and never fails.

mod allowlist;
mod policy;

pub use allowlist::AllowList;
pub use policy::{NavigationGate, Verdict};
