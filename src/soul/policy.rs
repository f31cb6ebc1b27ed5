//! Per-cycle policy seam.
//!
//! The loop itself guarantees invocation count and ordering, nothing
//! more. What a cycle actually does — generating reflections from
//! memories, recalculating affect, anything else — is supplied by the
//! embedding application through [`CyclePolicy`].

use anyhow::Result;
use tracing::debug;

use crate::affect::AffectState;
use crate::memory::RecordStore;

/// One cycle's worth of work over the three stores.
///
/// A policy is free to read or mutate any of the stores; the loop
/// asserts nothing about what it does. Returning an error halts the run
/// immediately.
pub trait CyclePolicy {
    fn cycle(
        &mut self,
        memories: &mut RecordStore,
        affect: &mut AffectState,
        reflections: &mut RecordStore,
    ) -> Result<()>;
}

/// Closures work as policies directly.
impl<F> CyclePolicy for F
where
    F: FnMut(&mut RecordStore, &mut AffectState, &mut RecordStore) -> Result<()>,
{
    fn cycle(
        &mut self,
        memories: &mut RecordStore,
        affect: &mut AffectState,
        reflections: &mut RecordStore,
    ) -> Result<()> {
        self(memories, affect, reflections)
    }
}

/// Default policy: leaves every store untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPolicy;

impl CyclePolicy for NoopPolicy {
    fn cycle(
        &mut self,
        _memories: &mut RecordStore,
        _affect: &mut AffectState,
        _reflections: &mut RecordStore,
    ) -> Result<()> {
        debug!("no-op cycle policy invoked");
        Ok(())
    }
}
