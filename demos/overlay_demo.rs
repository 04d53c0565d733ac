//! Show the optimistic overlay shielding a local edit from a stale refresh,
//! then deferring to the authoritative store once the TTL lapses.
//!
//! Run with: `cargo run --example overlay_demo`

use std::sync::Arc;

use anyhow::Result;
use chrono::Duration;
use pipelist::{
    ControllerConfig, DiscardMutator, ManualClock, MemoryStore, Patch, PipelineListController,
    Record, StaticRecordSource, fields,
};

fn main() -> Result<()> {
    let clock = Arc::new(ManualClock::at_epoch());
    let records = vec![
        Record::new("p1")
            .with_field(fields::NAME, "Ada Lovelace")
            .with_field(fields::STATUS, "active")
            .with_field(fields::NEXT_ACTION, "Call"),
    ];

    let mut controller = PipelineListController::new(
        ControllerConfig::new("speedrun", "demo-workspace")
            .overlay_ttl(Duration::seconds(30)),
        StaticRecordSource::new(records),
        DiscardMutator,
        clock.clone(),
        Box::new(MemoryStore::new()),
    );

    let status = |c: &PipelineListController<StaticRecordSource, DiscardMutator>| {
        c.view().page[0].text(fields::STATUS).to_string()
    };

    println!("remote says:            {}", status(&controller));

    controller.apply_edit(
        "p1".into(),
        Patch::new()
            .set(fields::STATUS, "contacted")
            .clear(fields::NEXT_ACTION),
    )?;
    println!("after local edit:       {}", status(&controller));

    // a background refresh lands 10s later with the stale remote value
    clock.advance(Duration::seconds(10));
    controller.recompute();
    println!("after stale refresh:    {} (edit survives)", status(&controller));

    // once the TTL lapses the authoritative value wins unconditionally
    clock.advance(Duration::seconds(25));
    controller.recompute();
    println!("after TTL expiry:       {}", status(&controller));

    Ok(())
}
