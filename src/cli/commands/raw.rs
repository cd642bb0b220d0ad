//! `raw`: dump the raw parse tree for grammar authoring

use super::shared::{read_grammar, setup_logging};
use crate::cli::args::RawArgs;
use crate::grammar::Grammar;
use crate::parser::parse_report;
use crate::source::ReportSource;
use anyhow::Context;
use tracing::info;

pub async fn run_raw(args: RawArgs) -> anyhow::Result<()> {
    setup_logging(&args.logging)?;

    let grammar_text = read_grammar(args.grammar.as_deref())?;
    let input = args.input.clone();
    let json = tokio::task::spawn_blocking(move || -> crate::error::Result<String> {
        let source = ReportSource::from_path(&input)?;
        let grammar = match &grammar_text {
            Some(text) => Grammar::parse(text, &source.version)?,
            None => Grammar::builtin(&source.version)?,
        };
        let raw = parse_report(&source.text, &grammar);
        Ok(serde_json::to_string_pretty(&raw)?)
    })
    .await
    .context("Parser worker did not complete")??;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Raw tree written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
