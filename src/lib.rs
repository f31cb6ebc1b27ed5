//! Soul Loop - Persisted Agent State Core
//!
//! Three small persisted stores and the loop that drives them:
//! - Episodic memories and derived reflections ([`memory::RecordStore`])
//! - Decaying emotional state ([`affect::AffectState`])
//! - A synchronous cycle orchestrator ([`soul::SoulLoop`]) with a
//!   pluggable per-cycle policy ([`soul::CyclePolicy`])
//!
//! The loop itself decides nothing: the shipped [`soul::NoopPolicy`]
//! leaves every store untouched, and real cycle behavior is injected by
//! the embedding application.
//!
//! # Example
//!
//! ```no_run
//! use soul_loop::{AffectState, NoopPolicy, RecordStore, SoulLoop};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut memories = RecordStore::new("memory.json", "memories");
//!     memories.load()?;
//!     let mut affect = AffectState::new("emotions.json");
//!     affect.load()?;
//!     let mut reflections = RecordStore::new("reflections.json", "reflections");
//!     reflections.load()?;
//!
//!     let mut soul = SoulLoop::new(memories, affect, reflections, Box::new(NoopPolicy));
//!     soul.run(3)?;
//!     println!("{}", soul.status());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod affect;
pub mod memory;
pub mod persist;
pub mod soul;

// Runtime surface
pub mod cli;
pub mod config;
pub mod obfuscate;

// Re-export commonly used types for convenience
pub use affect::{AffectState, EPSILON};
pub use config::SoulConfig;
pub use memory::{Record, RecordStore};
pub use persist::LoadMode;
pub use soul::{CyclePolicy, NoopPolicy, SoulLoop};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
