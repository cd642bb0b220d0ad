//! Line patterns: literal text with named placeholders, compiled to anchored regexes.

use regex::Regex;
use std::fmt;

/// Placeholder name that matches a word without capturing it
const IGNORED: &str = "_";

/// Value shape accepted by a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    /// Any run of non-whitespace characters
    Word,
    Int,
    /// Decimal or exponent notation, Fortran `D` exponents included
    Number,
    /// Words separated by single blanks
    Phrase,
    /// Everything up to the end of the line
    Line,
}

impl CaptureKind {
    fn parse(kind: &str) -> Option<Self> {
        match kind {
            "word" => Some(Self::Word),
            "int" => Some(Self::Int),
            "number" => Some(Self::Number),
            "phrase" => Some(Self::Phrase),
            "line" => Some(Self::Line),
            _ => None,
        }
    }

    fn regex(&self) -> &'static str {
        match self {
            Self::Word => r"\S+",
            Self::Int => r"[-+]?\d+",
            Self::Number => r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eEdD][-+]?\d+)?",
            Self::Phrase => r"\S+(?:[ \t]\S+)*",
            Self::Line => r".+",
        }
    }
}

/// A compiled line pattern
#[derive(Clone)]
pub struct LinePattern {
    source: String,
    regex: Regex,
    names: Vec<String>,
}

impl LinePattern {
    /// Compile a template such as `"LOADING NUMBER {{case:int}}"`
    pub fn compile(template: &str) -> Result<Self, String> {
        let source = template.trim().to_string();
        if source.is_empty() {
            return Err("empty pattern".to_string());
        }

        let mut expr = String::from(r"^\s*");
        let mut names: Vec<String> = Vec::new();
        let mut rest = source.as_str();

        while let Some(open) = rest.find("{{") {
            push_literal(&mut expr, &rest[..open]);
            let after = &rest[open + 2..];
            let close = after
                .find("}}")
                .ok_or_else(|| format!("unclosed placeholder in '{}'", source))?;
            let (name, kind) = parse_placeholder(&after[..close])?;

            if name == IGNORED {
                expr.push_str(&format!("(?:{})", kind.regex()));
            } else {
                if names.iter().any(|n| n == name) {
                    return Err(format!("duplicate placeholder '{}' in '{}'", name, source));
                }
                expr.push_str(&format!("(?P<{}>{})", name, kind.regex()));
                names.push(name.to_string());
            }
            rest = &after[close + 2..];
        }
        push_literal(&mut expr, rest);
        expr.push_str(r"\s*$");

        let regex = Regex::new(&expr).map_err(|e| format!("invalid pattern '{}': {}", source, e))?;
        Ok(Self {
            source,
            regex,
            names,
        })
    }

    /// Captured placeholder names in template order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Match a whole line, returning `(name, value)` pairs in template order
    pub fn captures(&self, line: &str) -> Option<Vec<(String, String)>> {
        let caps = self.regex.captures(line)?;
        Some(
            self.names
                .iter()
                .filter_map(|name| {
                    caps.name(name)
                        .map(|m| (name.clone(), m.as_str().to_string()))
                })
                .collect(),
        )
    }
}

impl fmt::Debug for LinePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LinePattern").field(&self.source).finish()
    }
}

fn parse_placeholder(body: &str) -> Result<(&str, CaptureKind), String> {
    let (name, kind) = match body.split_once(':') {
        Some((name, kind)) => {
            let kind = kind.trim();
            let kind = CaptureKind::parse(kind)
                .ok_or_else(|| format!("unknown placeholder kind '{}'", kind))?;
            (name.trim(), kind)
        }
        None => (body.trim(), CaptureKind::Word),
    };

    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(format!("invalid placeholder name '{}'", name));
    }
    Ok((name, kind))
}

/// Append literal text, letting any whitespace run match any whitespace run
fn push_literal(expr: &mut String, literal: &str) {
    let mut in_space = false;
    let mut word = String::new();
    for c in literal.chars() {
        if c.is_whitespace() {
            if !word.is_empty() {
                expr.push_str(&regex::escape(&word));
                word.clear();
            }
            if !in_space {
                expr.push_str(r"\s+");
                in_space = true;
            }
        } else {
            word.push(c);
            in_space = false;
        }
    }
    if !word.is_empty() {
        expr.push_str(&regex::escape(&word));
    }
}
