//! Single-pass line scanner.
//!
//! The scanner keeps a stack of open scopes, root at the bottom. Each line is
//! offered to the innermost scope first and then outward; the first rule that
//! claims it wins and every scope above the claiming one is closed into its
//! parent.

use super::{RawGroup, RawNode};
use crate::grammar::{Grammar, LinePattern, Rule, SectionRule, TableRule};
use crate::models::Row;
use tracing::{trace, warn};

/// Rules visible to an open scope
#[derive(Clone, Copy)]
enum Scope<'g> {
    Root(&'g [Rule]),
    Section(&'g SectionRule),
    Table(&'g TableRule),
}

/// Content collected by an open scope
enum Collected {
    Group {
        name: String,
        list: bool,
        group: RawGroup,
    },
    Rows {
        name: String,
        rows: Vec<Row>,
    },
}

struct Frame<'g> {
    scope: Scope<'g>,
    collected: Collected,
}

/// What a claimed line does to the scope that claimed it
enum Action<'g> {
    Close,
    Field(Vec<(String, String)>),
    /// Row for a start-less table of the claiming section
    TableRow(&'g str, Row),
    /// Row for the claiming table scope itself
    OwnRow(Row),
    OpenSection(&'g SectionRule, Vec<(String, String)>),
    OpenTable(&'g TableRule),
}

/// Incremental report scanner bound to one grammar
pub struct Scanner<'g> {
    stack: Vec<Frame<'g>>,
    line_number: usize,
}

impl<'g> Scanner<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        let root = Frame {
            scope: Scope::Root(grammar.rules()),
            collected: Collected::Group {
                name: String::new(),
                list: false,
                group: RawGroup::new(),
            },
        };
        Self {
            stack: vec![root],
            line_number: 0,
        }
    }

    /// Offer one line of report text to the open scopes
    pub fn feed(&mut self, line: &str) {
        self.line_number += 1;

        for depth in (0..self.stack.len()).rev() {
            if let Some(action) = claim(self.stack[depth].scope, line) {
                self.close_above(depth);
                self.apply(action);
                return;
            }
        }

        if !line.trim().is_empty() {
            trace!("Line {} not claimed by any rule", self.line_number);
        }
    }

    /// Close every open scope and return the finished tree
    pub fn finish(mut self) -> RawGroup {
        self.close_above(0);
        match self.stack.pop().map(|frame| frame.collected) {
            Some(Collected::Group { group, .. }) => group,
            _ => RawGroup::new(),
        }
    }

    fn close_above(&mut self, depth: usize) {
        while self.stack.len() > depth + 1 {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let parent = self.top_group();
        match frame.collected {
            Collected::Group {
                name,
                list: true,
                group,
            } => {
                if let Some(existing) = parent.get(&name).filter(|n| !matches!(n, RawNode::List(_))) {
                    warn!("Section '{}' is both a list and a {}", name, existing.kind());
                    parent.shift_remove(&name);
                }
                merge_node(parent, name, RawNode::List(vec![group]));
            }
            Collected::Group { name, group, .. } => {
                merge_node(parent, name, RawNode::Group(group));
            }
            Collected::Rows { name, rows } => {
                merge_node(parent, name, RawNode::Rows(rows));
            }
        }
    }

    /// Group of the innermost section scope; table frames never hold children
    fn top_group(&mut self) -> &mut RawGroup {
        for frame in self.stack.iter_mut().rev() {
            if let Collected::Group { group, .. } = &mut frame.collected {
                return group;
            }
        }
        unreachable!("scanner stack always holds the root group")
    }

    fn apply(&mut self, action: Action<'g>) {
        match action {
            Action::Close => self.close_top(),
            Action::Field(captures) => {
                let group = self.top_group();
                for (name, value) in captures {
                    group.insert(name, RawNode::Text(value));
                }
            }
            Action::TableRow(table, row) => {
                let line_number = self.line_number;
                let group = self.top_group();
                match group.get_mut(table) {
                    Some(RawNode::Rows(rows)) => rows.push(row),
                    Some(existing) => {
                        warn!(
                            "Line {}: '{}' already holds a {}, row dropped",
                            line_number,
                            table,
                            existing.kind()
                        );
                    }
                    None => {
                        group.insert(table.to_string(), RawNode::Rows(vec![row]));
                    }
                }
            }
            Action::OwnRow(row) => {
                if let Some(Frame {
                    collected: Collected::Rows { rows, .. },
                    ..
                }) = self.stack.last_mut()
                {
                    rows.push(row);
                }
            }
            Action::OpenSection(rule, captures) => {
                let name = rule.name.render(&captures);
                let mut group = RawGroup::new();
                for (field, value) in captures {
                    if !rule.name.captures().any(|c| c == field) {
                        group.insert(field, RawNode::Text(value));
                    }
                }
                trace!("Line {}: open section {}", self.line_number, name);
                self.stack.push(Frame {
                    scope: Scope::Section(rule),
                    collected: Collected::Group {
                        name,
                        list: rule.list,
                        group,
                    },
                });
            }
            Action::OpenTable(rule) => {
                trace!("Line {}: open table {}", self.line_number, rule.name);
                self.stack.push(Frame {
                    scope: Scope::Table(rule),
                    collected: Collected::Rows {
                        name: rule.name.clone(),
                        rows: Vec::new(),
                    },
                });
            }
        }
    }
}

fn claim<'g>(scope: Scope<'g>, line: &str) -> Option<Action<'g>> {
    match scope {
        Scope::Root(rules) => claim_rules(rules, line),
        Scope::Section(section) => {
            if section.stop.as_ref().is_some_and(|stop| stop.is_match(line)) {
                return Some(Action::Close);
            }
            claim_rules(&section.rules, line)
        }
        Scope::Table(table) => row_of(&table.row, line).map(Action::OwnRow),
    }
}

fn claim_rules<'g>(rules: &'g [Rule], line: &str) -> Option<Action<'g>> {
    rules.iter().find_map(|rule| match rule {
        Rule::Field(pattern) => pattern.captures(line).map(Action::Field),
        Rule::Section(section) => section
            .start
            .captures(line)
            .map(|captures| Action::OpenSection(section, captures)),
        Rule::Table(table) => match &table.start {
            Some(start) => start.is_match(line).then_some(Action::OpenTable(table)),
            None => row_of(&table.row, line).map(|row| Action::TableRow(&table.name, row)),
        },
    })
}

fn row_of(pattern: &LinePattern, line: &str) -> Option<Row> {
    pattern.captures(line).map(|captures| captures.into_iter().collect())
}

/// Insert a closed scope into its parent, merging with a same-named sibling
fn merge_node(parent: &mut RawGroup, name: String, node: RawNode) {
    let Some(existing) = parent.get_mut(&name) else {
        parent.insert(name, node);
        return;
    };
    match (existing, node) {
        (RawNode::Group(existing), RawNode::Group(incoming)) => {
            for (key, value) in incoming {
                merge_node(existing, key, value);
            }
        }
        (RawNode::Rows(existing), RawNode::Rows(incoming)) => existing.extend(incoming),
        (RawNode::List(existing), RawNode::List(incoming)) => existing.extend(incoming),
        (existing, node) => *existing = node,
    }
}
