//! Tests for the section grammar parser


use crate::grammar::Grammar;
use crate::parser::{RawGroup, RawNode, parse_report};
use crate::version::ReportVersion;

/// Parse `text` with a grammar compiled for v12
fn parse_with(grammar: &str, text: &str) -> RawGroup {
    let grammar = Grammar::parse(grammar, &ReportVersion::new(12)).unwrap();
    parse_report(text, &grammar)
}

fn group<'a>(tree: &'a RawGroup, key: &str) -> &'a RawGroup {
    match tree.get(key) {
        Some(RawNode::Group(group)) => group,
        other => panic!("expected group at {}, got {:?}", key, other),
    }
}

fn text<'a>(tree: &'a RawGroup, key: &str) -> &'a str {
    match tree.get(key) {
        Some(RawNode::Text(text)) => text,
        other => panic!("expected text at {}, got {:?}", key, other),
    }
}
