//! The soul loop itself.

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::policy::CyclePolicy;
use crate::affect::AffectState;
use crate::memory::RecordStore;

/// Drives the three stores through repeated cycles.
///
/// The loop owns the memory store, the affect state, the reflection
/// store, and a [`CyclePolicy`]. It is idle between calls and running
/// only inside [`run`](Self::run); execution is synchronous and
/// single-threaded, so nothing else can touch the stores mid-loop.
pub struct SoulLoop {
    memories: RecordStore,
    affect: AffectState,
    reflections: RecordStore,
    policy: Box<dyn CyclePolicy>,
}

impl SoulLoop {
    /// Wire up fully-constructed stores and a policy.
    pub fn new(
        memories: RecordStore,
        affect: AffectState,
        reflections: RecordStore,
        policy: Box<dyn CyclePolicy>,
    ) -> Self {
        Self {
            memories,
            affect,
            reflections,
            policy,
        }
    }

    /// Execute `iterations` cycles sequentially.
    ///
    /// The policy is invoked exactly once per cycle, in order; cycle
    /// `k` completes before cycle `k + 1` begins. Zero iterations is a
    /// no-op, not an error. The first policy error halts the run and
    /// propagates.
    pub fn run(&mut self, iterations: u32) -> Result<()> {
        info!("starting soul loop for {} iterations", iterations);
        for i in 0..iterations {
            debug!("soul loop iteration {}", i + 1);
            self.policy
                .cycle(&mut self.memories, &mut self.affect, &mut self.reflections)
                .with_context(|| format!("soul cycle {} failed", i + 1))?;
        }
        info!("soul loop complete");
        Ok(())
    }

    /// Composite report: both store summaries plus the dominant emotion.
    pub fn status(&self) -> String {
        let dominant = match self.affect.dominant() {
            Some((name, intensity)) => format!("{} ({:.3})", name, intensity),
            None => "none".to_string(),
        };
        format!(
            "{}\n{}\ndominant emotion: {}",
            self.memories.summarize(),
            self.reflections.summarize(),
            dominant
        )
    }

    pub fn memories(&self) -> &RecordStore {
        &self.memories
    }

    pub fn memories_mut(&mut self) -> &mut RecordStore {
        &mut self.memories
    }

    pub fn affect(&self) -> &AffectState {
        &self.affect
    }

    pub fn affect_mut(&mut self) -> &mut AffectState {
        &mut self.affect
    }

    pub fn reflections(&self) -> &RecordStore {
        &self.reflections
    }

    pub fn reflections_mut(&mut self) -> &mut RecordStore {
        &mut self.reflections
    }

    /// Give the stores back to the caller.
    pub fn into_parts(self) -> (RecordStore, AffectState, RecordStore) {
        (self.memories, self.affect, self.reflections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soul::NoopPolicy;

    fn empty_loop() -> SoulLoop {
        SoulLoop::new(
            RecordStore::new("memory.json", "memories"),
            AffectState::new("emotions.json"),
            RecordStore::new("reflections.json", "reflections"),
            Box::new(NoopPolicy),
        )
    }

    #[test]
    fn zero_iterations_is_not_an_error() {
        let mut soul = empty_loop();
        soul.run(0).unwrap();
    }

    #[test]
    fn status_reports_all_three_stores() {
        let mut soul = empty_loop();
        soul.affect_mut().update("joy", 0.5);
        let status = soul.status();
        assert!(status.contains("0 memories stored."));
        assert!(status.contains("0 reflections stored."));
        assert!(status.contains("joy (0.500)"));
    }

    #[test]
    fn status_reports_none_without_emotions() {
        let soul = empty_loop();
        assert!(soul.status().contains("dominant emotion: none"));
    }
}
