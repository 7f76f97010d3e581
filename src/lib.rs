//! Blocktris (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and holds the host-side
//! pieces shared by the binary and the integration tests.

pub use blocktris_core as core;
pub use blocktris_input as input;
pub use blocktris_store as store;
pub use blocktris_term as term;
pub use blocktris_types as types;

pub mod config;
pub mod logging;
pub mod session;
