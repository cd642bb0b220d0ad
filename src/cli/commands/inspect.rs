//! `inspect`: document overview of one report

use super::shared::{load_document, setup_logging};
use crate::cli::args::InspectArgs;
use crate::export::summary_to_json;
use crate::processor::Document;
use crate::summary::BuildOptions;
use colored::*;

pub async fn run_inspect(args: InspectArgs) -> anyhow::Result<()> {
    setup_logging(&args.logging)?;

    let options = BuildOptions {
        strict_pile_count: args.strict_pile_count,
    };
    let document = load_document(&args.input, args.grammar.as_deref(), options).await?;

    if args.json {
        println!("{}", summary_to_json(&document.summary)?);
    } else {
        print_overview(&document);
    }
    Ok(())
}

fn print_overview(document: &Document) {
    let info = &document.summary.info;

    println!("{}", "GROUP Report".bright_green().bold());
    let rows = [
        ("Filename:", document.source.filename.clone()),
        ("Group version:", info.group_version.clone()),
        ("Date/time:", info.datetime.clone()),
        ("Computation:", info.computation_name.clone()),
        ("Load cases:", info.total_load_case.to_string()),
        ("Piles:", info.total_pile.to_string()),
        ("Records:", document.records.len().to_string()),
    ];
    for (label, value) in rows {
        println!("  {:<16} {}", label.bright_cyan(), value.bright_white());
    }

    println!("\n{}", "Load cases".bright_green().bold());
    for (key, load) in document.summary.loads_in_order() {
        let Some(load) = load else { continue };
        println!(
            "  {:<10} {:<28} {:<12} {} piles",
            key.bright_white(),
            load.info.case_name,
            load.info.load_type,
            load.info.total_pile
        );
    }
}
