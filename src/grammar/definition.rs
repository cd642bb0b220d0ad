//! Loader for the grammar text format.
//!
//! ```text
//! section LOAD_{{case}} list@modern
//!     start "LOADING NUMBER {{case:int}}"
//!     section INFO
//!         start "CASE NAME: {{case_name:phrase}}"
//!         field "LOAD TYPE: {{load_type:phrase}}"
//!     end
//!     table DATA_1 @modern
//!         start "PART 1 - FORCES"
//!         row "{{pile_group:int}} {{axial_force:number}}"
//!     end
//! end
//! ```
//!
//! One statement per line, indentation is free and `#` starts a comment line.

use super::{LinePattern, NameTemplate, Rule, SectionRule, TableRule};
use crate::error::{Result, SolummaaError};
use crate::version::ReportVersion;

/// Parse grammar text into the rules active for `version`
pub fn parse_rules(text: &str, version: &ReportVersion) -> Result<Vec<Rule>> {
    let statements = text
        .lines()
        .enumerate()
        .filter_map(|(index, line)| Statement::parse(index + 1, line))
        .collect();

    let mut parser = DefinitionParser {
        statements,
        position: 0,
        version,
    };
    parser.root()
}

#[derive(Debug, Clone, Copy)]
struct Statement<'a> {
    line: usize,
    keyword: &'a str,
    rest: &'a str,
}

impl<'a> Statement<'a> {
    fn parse(line: usize, text: &'a str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (trimmed, ""),
        };
        Some(Self {
            line,
            keyword,
            rest,
        })
    }

    fn error(&self, message: impl Into<String>) -> SolummaaError {
        SolummaaError::grammar(self.line, message)
    }

    /// Compile the quoted pattern following the keyword
    fn pattern(&self) -> Result<LinePattern> {
        let quoted = self.rest;
        let inner = match (quoted.find('"'), quoted.rfind('"')) {
            (Some(0), Some(end)) if end > 0 && end == quoted.len() - 1 => &quoted[1..end],
            _ => {
                return Err(self.error(format!(
                    "'{}' expects a double-quoted pattern",
                    self.keyword
                )));
            }
        };
        LinePattern::compile(inner).map_err(|message| self.error(message))
    }
}

/// Name and modifiers of a `section` or `table` header
struct BlockHeader<'a> {
    name: &'a str,
    list: bool,
    active: bool,
}

impl<'a> BlockHeader<'a> {
    fn parse(statement: &Statement<'a>, version: &ReportVersion) -> Result<Self> {
        let mut tokens = statement.rest.split_whitespace();
        let name = tokens
            .next()
            .ok_or_else(|| statement.error(format!("'{}' needs a name", statement.keyword)))?;

        let mut header = Self {
            name,
            list: false,
            active: true,
        };

        for token in tokens {
            if token == "list" {
                header.list = true;
            } else if let Some(tags) = token.strip_prefix("list@") {
                header.list = tags_match(statement, tags, version)?;
            } else if let Some(tags) = token.strip_prefix('@') {
                header.active = tags_match(statement, tags, version)?;
            } else {
                return Err(statement.error(format!("unknown modifier '{}'", token)));
            }
        }
        Ok(header)
    }
}

fn tags_match(statement: &Statement<'_>, tags: &str, version: &ReportVersion) -> Result<bool> {
    let tags: Vec<&str> = tags
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tags.is_empty() {
        return Err(statement.error("empty version tag list"));
    }
    Ok(tags.iter().any(|tag| version.matches_tag(tag)))
}

struct DefinitionParser<'a> {
    statements: Vec<Statement<'a>>,
    position: usize,
    version: &'a ReportVersion,
}

impl<'a> DefinitionParser<'a> {
    fn next(&mut self) -> Option<Statement<'a>> {
        let statement = self.statements.get(self.position).copied();
        self.position += 1;
        statement
    }

    fn root(&mut self) -> Result<Vec<Rule>> {
        let mut rules = Vec::new();
        while let Some(statement) = self.next() {
            if let Some(rule) = self.rule(statement)? {
                rules.push(rule);
            }
        }
        Ok(rules)
    }

    /// Parse a statement that may appear inside any scope
    fn rule(&mut self, statement: Statement<'a>) -> Result<Option<Rule>> {
        match statement.keyword {
            "field" => Ok(Some(Rule::Field(statement.pattern()?))),
            "section" => self.section(statement),
            "table" => self.table(statement),
            "end" => Err(statement.error("'end' without an open block")),
            other => Err(statement.error(format!("'{}' is not allowed here", other))),
        }
    }

    fn section(&mut self, header_statement: Statement<'a>) -> Result<Option<Rule>> {
        let header = BlockHeader::parse(&header_statement, self.version)?;
        let name = NameTemplate::parse(header.name).map_err(|m| header_statement.error(m))?;

        let mut start = None;
        let mut stop = None;
        let mut rules = Vec::new();

        loop {
            let statement = self.next().ok_or_else(|| {
                header_statement.error(format!("section '{}' is missing 'end'", header.name))
            })?;
            match statement.keyword {
                "end" => break,
                "start" if start.is_some() => {
                    return Err(statement.error("duplicate 'start' in section"));
                }
                "start" => start = Some(statement.pattern()?),
                "stop" => stop = Some(statement.pattern()?),
                _ => {
                    if let Some(rule) = self.rule(statement)? {
                        rules.push(rule);
                    }
                }
            }
        }

        let start = start.ok_or_else(|| {
            header_statement.error(format!("section '{}' has no 'start' line", header.name))
        })?;

        if let Some(missing) = name
            .captures()
            .find(|capture| !start.names().iter().any(|n| n == capture))
        {
            return Err(header_statement.error(format!(
                "name placeholder '{}' is not captured by the start line",
                missing
            )));
        }

        if !header.active {
            return Ok(None);
        }

        Ok(Some(Rule::Section(SectionRule {
            name,
            start,
            stop,
            list: header.list,
            rules,
        })))
    }

    fn table(&mut self, header_statement: Statement<'a>) -> Result<Option<Rule>> {
        let header = BlockHeader::parse(&header_statement, self.version)?;
        if header.list {
            return Err(header_statement.error("'list' applies to sections only"));
        }

        let mut start = None;
        let mut row = None;

        loop {
            let statement = self.next().ok_or_else(|| {
                header_statement.error(format!("table '{}' is missing 'end'", header.name))
            })?;
            match statement.keyword {
                "end" => break,
                "start" => start = Some(statement.pattern()?),
                "row" if row.is_some() => {
                    return Err(statement.error("tables take a single 'row' pattern"));
                }
                "row" => row = Some(statement.pattern()?),
                other => {
                    return Err(statement.error(format!("'{}' is not allowed in a table", other)));
                }
            }
        }

        let row = row.ok_or_else(|| {
            header_statement.error(format!("table '{}' has no 'row' pattern", header.name))
        })?;

        if !header.active {
            return Ok(None);
        }

        Ok(Some(Rule::Table(TableRule {
            name: header.name.to_string(),
            start,
            row,
        })))
    }
}
