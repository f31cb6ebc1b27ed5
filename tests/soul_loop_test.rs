//! Cycle orchestration and affect decay behavior.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use serde_json::Value;
use soul_loop::{AffectState, NoopPolicy, Record, RecordStore, SoulLoop};
use tempfile::tempdir;

fn stores(dir: &std::path::Path) -> (RecordStore, AffectState, RecordStore) {
    (
        RecordStore::new(dir.join("memory.json"), "memories"),
        AffectState::new(dir.join("emotions.json")),
        RecordStore::new(dir.join("reflections.json"), "reflections"),
    )
}

#[test]
fn run_invokes_policy_exactly_n_times_in_order() -> Result<()> {
    let dir = tempdir()?;
    let (memories, affect, reflections) = stores(dir.path());

    let observed = Rc::new(RefCell::new(Vec::new()));
    let sink = observed.clone();
    let policy =
        move |_m: &mut RecordStore, _a: &mut AffectState, _r: &mut RecordStore| -> Result<()> {
            let next = sink.borrow().len() as u32 + 1;
            sink.borrow_mut().push(next);
            Ok(())
        };

    let mut soul = SoulLoop::new(memories, affect, reflections, Box::new(policy));
    soul.run(3)?;
    assert_eq!(*observed.borrow(), vec![1, 2, 3]);
    Ok(())
}

#[test]
fn run_zero_iterations_invokes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let (memories, affect, reflections) = stores(dir.path());

    let count = Rc::new(RefCell::new(0u32));
    let sink = count.clone();
    let policy =
        move |_m: &mut RecordStore, _a: &mut AffectState, _r: &mut RecordStore| -> Result<()> {
            *sink.borrow_mut() += 1;
            Ok(())
        };

    let mut soul = SoulLoop::new(memories, affect, reflections, Box::new(policy));
    soul.run(0)?;
    assert_eq!(*count.borrow(), 0);
    Ok(())
}

#[test]
fn policy_error_halts_the_run() -> Result<()> {
    let dir = tempdir()?;
    let (memories, affect, reflections) = stores(dir.path());

    let count = Rc::new(RefCell::new(0u32));
    let sink = count.clone();
    let policy =
        move |_m: &mut RecordStore, _a: &mut AffectState, _r: &mut RecordStore| -> Result<()> {
            *sink.borrow_mut() += 1;
            if *sink.borrow() == 2 {
                return Err(anyhow!("cycle blew up"));
            }
            Ok(())
        };

    let mut soul = SoulLoop::new(memories, affect, reflections, Box::new(policy));
    assert!(soul.run(5).is_err());
    assert_eq!(*count.borrow(), 2);
    Ok(())
}

#[test]
fn policy_mutations_are_visible_between_cycles() -> Result<()> {
    let dir = tempdir()?;
    let (memories, affect, reflections) = stores(dir.path());

    // Each cycle records a memory, stirs affect, and reflects on the
    // newest memory - the shape a real embedding application takes.
    let policy = |m: &mut RecordStore, a: &mut AffectState, r: &mut RecordStore| -> Result<()> {
        let mut entry = Record::new();
        entry.insert(
            "event".to_string(),
            Value::String(format!("cycle {}", m.len() + 1)),
        );
        m.add(entry);
        a.update("curiosity", 0.5);
        a.decay(0.1);
        if let Some(latest) = m.records().last() {
            r.add(latest.clone());
        }
        Ok(())
    };

    let mut soul = SoulLoop::new(memories, affect, reflections, Box::new(policy));
    soul.run(2)?;

    assert_eq!(soul.memories().len(), 2);
    assert_eq!(soul.reflections().len(), 2);
    let curiosity = soul.affect().get("curiosity").unwrap();
    assert!((curiosity - 0.45).abs() < 1e-12);
    Ok(())
}

#[test]
fn noop_policy_touches_nothing() -> Result<()> {
    let dir = tempdir()?;
    let (mut memories, affect, reflections) = stores(dir.path());
    memories.add(Record::new());

    let mut soul = SoulLoop::new(memories, affect, reflections, Box::new(NoopPolicy));
    soul.run(10)?;
    assert_eq!(soul.memories().len(), 1);
    assert!(soul.affect().is_empty());
    assert!(soul.reflections().is_empty());
    Ok(())
}

#[test]
fn decay_halves_and_dominant_tracks_the_peak() {
    let mut affect = AffectState::new("unused.json");
    affect.update("joy", 0.8);
    affect.update("fear", 0.3);
    affect.decay(0.5);

    assert!((affect.get("joy").unwrap() - 0.4).abs() < 1e-12);
    assert!((affect.get("fear").unwrap() - 0.15).abs() < 1e-12);

    // Intensities are distinct on purpose: the tie-break among equal
    // maxima is implementation-defined.
    let (name, intensity) = affect.dominant().unwrap();
    assert_eq!(name, "joy");
    assert!((intensity - 0.4).abs() < 1e-12);
}

#[test]
fn repeated_decay_prunes_to_nothing() {
    let mut affect = AffectState::new("unused.json");
    affect.update("joy", 1e-5);

    let mut passes = 0;
    while affect.get("joy").is_some() {
        affect.decay(0.5);
        passes += 1;
        assert!(passes < 64, "decay never pruned the entry");
    }
    assert!(affect.is_empty());
}
