use clap::Parser;
use log::{debug, info};
use serde::Serialize;
use std::time::Instant;

use typed_array::{
    ClassDef, ConstructError, Fields, Instance, TypeRegistry, TypedError, TypedList, Value,
};

mod cli;
use cli::Cli;

/// What the sample workload observed.
#[derive(Serialize)]
struct SampleReport {
    length: i64,
    doubled_count: usize,
    mapped_last: Option<i64>,
    filtered_count: usize,
    all_filtered_even: bool,
    foreign_class_rejected: bool,
    coerced_value: Option<i64>,
    elapsed_ms: f64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    let report = match run_sample(cli.length) {
        Ok(mut report) => {
            report.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            report
        }
        Err(e) => {
            eprintln!("sample failed: {}", e);
            std::process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("failed to encode report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}

fn print_report(report: &SampleReport) {
    println!("length:          {}", report.length);
    println!("doubled count:   {}", report.doubled_count);
    println!("mapped last:     {:?}", report.mapped_last);
    println!(
        "filtered count:  {} (all even: {})",
        report.filtered_count, report.all_filtered_even
    );
    println!("foreign class rejected: {}", report.foreign_class_rejected);
    println!("coerced value:   {:?}", report.coerced_value);
    println!("elapsed:         {:.3} ms", report.elapsed_ms);
}

/// Integer-wrapping class with a single `value` field.
fn example_class(name: &str) -> ClassDef {
    ClassDef::new(name).constructor(|raw: &Value| -> Result<Fields, ConstructError> {
        let value = raw.as_integer().ok_or_else(|| {
            ConstructError::new(format!("expected integer, got {}", raw.type_name()))
        })?;
        let mut fields = Fields::new();
        fields.insert("value".to_string(), Value::Integer(value));
        Ok(fields)
    })
}

fn field_value(v: &Value) -> Option<i64> {
    v.as_instance()?.field("value")?.as_integer()
}

fn run_sample(length: i64) -> Result<SampleReport, TypedError> {
    let mut registry = TypeRegistry::new();
    let example1 = registry.register(example_class("Example1"));
    let example2 = registry.register(example_class("Example2"));

    let list = TypedList::new(&registry, "int", 1..=length)?;
    info!("built list of {} integers", list.count());

    let mut doubled = TypedList::empty(&registry, "int")?;
    for item in &list {
        if let Some(i) = item.as_integer() {
            doubled.add(i * 2)?;
        }
    }

    let mapped = list.map_with_same_type(|v| v.as_integer().unwrap_or_default() * 2)?;
    let filtered = list.filter(|v| v.as_integer().is_some_and(|i| i % 2 == 0))?;
    let mut all_filtered_even = true;
    filtered.each(|v| all_filtered_even &= v.as_integer().is_some_and(|i| i % 2 == 0));
    debug!("filtered down to {} items", filtered.count());

    let mut examples = TypedList::new(
        &registry,
        "Example1",
        [
            Instance::with_field(&example1, "value", 1),
            Instance::with_field(&example1, "value", 2),
        ],
    )?;
    let foreign_class_rejected = examples
        .add(Instance::with_field(&example2, "value", 3))
        .is_err();
    examples.add(Instance::with_field(&example1, "value", 3))?;
    // A raw integer goes through Example1's constructor.
    examples.add(3)?;
    let coerced = examples.last()?;
    let coerced_value = coerced
        .is_instance_of("Example1")
        .then(|| field_value(coerced))
        .flatten();

    Ok(SampleReport {
        length,
        doubled_count: doubled.count(),
        mapped_last: mapped.last().ok().and_then(Value::as_integer),
        filtered_count: filtered.count(),
        all_filtered_even,
        foreign_class_rejected,
        coerced_value,
        elapsed_ms: 0.0,
    })
}
