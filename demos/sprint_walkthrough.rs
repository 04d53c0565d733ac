//! Walk a small pipeline list through a sprint: rank, filter, complete,
//! snooze, and page through batches.
//!
//! Run with: `cargo run --example sprint_walkthrough`

use std::sync::Arc;

use anyhow::Result;
use pipelist::{
    Company, ControllerConfig, DiscardMutator, PipelineListController, Record, SnoozeDuration,
    SortDirection, StaticRecordSource, SystemClock, MemoryStore, fields,
};

fn seed_records() -> Vec<Record> {
    let names = [
        ("1A", "Ada Lovelace", "VP Engineering", "Initech"),
        ("1B", "Grace Hopper", "CTO", "Initech"),
        ("2A", "Alan Kay", "Head of Product", "Globex"),
        ("2B", "Barbara Liskov", "Chief Architect", "Globex"),
        ("3A", "Edsger Dijkstra", "Principal Engineer", "Hooli"),
        ("3B", "Tony Hoare", "Director of Data", "Hooli"),
        ("4A", "Leslie Lamport", "VP Infrastructure", "Vandelay"),
        ("4B", "Donald Knuth", "Distinguished Engineer", "Vandelay"),
        ("5A", "John Backus", "Head of Platform", "Stark"),
        ("5B", "Frances Allen", "VP Research", "Stark"),
        ("6A", "Ken Thompson", "Staff Engineer", "Wayne"),
        ("6B", "Dennis Ritchie", "Systems Lead", "Wayne"),
    ];
    names
        .iter()
        .map(|(rank, name, title, company)| {
            Record::new(*rank)
                .with_field(fields::NAME, *name)
                .with_field(fields::TITLE, *title)
                .with_field(fields::RANK, *rank)
                .with_field(fields::STATUS, "active")
                .with_company(Company::new(format!("c-{}", company)).with_field(fields::NAME, *company))
        })
        .collect()
}

fn print_page(controller: &PipelineListController<StaticRecordSource, DiscardMutator>) {
    let view = controller.view();
    println!(
        "-- sprint {}/{} · {} active · {} completed",
        view.batch_index + 1,
        view.batch_count.max(1),
        view.total_active,
        view.total_completed,
    );
    for record in &view.page {
        let marker = match &view.selection {
            Some(id) if id == record.id() => ">",
            _ => " ",
        };
        println!(
            " {} [{}] {:22} {:22} {}",
            marker,
            record.text(fields::RANK),
            record.text(fields::NAME),
            record.text(fields::TITLE),
            record.text(fields::COMPANY),
        );
    }
    println!();
}

fn main() -> Result<()> {
    let mut controller = PipelineListController::new(
        ControllerConfig::new("speedrun", "demo-workspace"),
        StaticRecordSource::new(seed_records()),
        DiscardMutator,
        Arc::new(SystemClock),
        Box::new(MemoryStore::new()),
    );

    println!("initial working set (input order):");
    print_page(&controller);

    controller.set_sort_field(fields::RANK)?;
    assert_eq!(controller.sort_spec().direction, SortDirection::Descending);
    println!("after one click on the rank column (descending, never ascending):");
    print_page(&controller);

    controller.set_sort_field(fields::RANK)?; // back to unsorted
    controller.next();
    controller.mark_complete("1A".into())?;
    println!("after completing 1A (held at the bottom of its sprint):");
    print_page(&controller);

    controller.snooze("2A".into(), SnoozeDuration::Days(3))?;
    println!("after snoozing 2A for three days:");
    print_page(&controller);

    controller.set_batch_index(1);
    println!("the second sprint:");
    print_page(&controller);

    Ok(())
}
