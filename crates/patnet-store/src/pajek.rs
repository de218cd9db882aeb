//! Pajek `.net` text interchange format
//!
//! Layout written:
//!
//! ```text
//! *network EPO Collaboration Graph
//! *vertices 3
//! 1 "Acme Co." 0.0 0.0 ellipse
//! 2 Beta 0.0 0.0 ellipse
//! 3 Gamma 0.0 0.0 ellipse
//! *edges
//! 1 2 1.0 label "G"
//! ```
//!
//! The ` 0.0 0.0 ellipse` tail of each vertex line is a rendering artifact;
//! see [`crate::clean`].

use crate::graph::CollaborationGraph;
use crate::StoreError;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Serialize a graph to Pajek text
pub fn to_pajek(graph: &CollaborationGraph) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "*network {}", graph.name());
    let _ = writeln!(out, "*vertices {}", graph.node_count());
    for (idx, name) in graph.nodes().enumerate() {
        let _ = writeln!(out, "{} {} 0.0 0.0 ellipse", idx + 1, quote(name));
    }

    out.push_str("*edges\n");
    for (a, b, label) in graph.indexed_edges() {
        let _ = write!(out, "{} {} 1.0", a + 1, b + 1);
        if !label.trim().is_empty() {
            let _ = write!(out, " label \"{}\"", escape(label));
        }
        out.push('\n');
    }

    out
}

/// Parse Pajek text into a graph named `default_name` unless the file names it
pub fn from_pajek(text: &str, default_name: &str) -> Result<CollaborationGraph, StoreError> {
    let mut graph = CollaborationGraph::new(default_name);
    let mut labels: HashMap<String, String> = HashMap::new();
    let mut lines = text.lines().enumerate();

    while let Some((lineno, line)) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lower = trimmed.to_ascii_lowercase();

        if lower.starts_with("*network") {
            let name = trimmed["*network".len()..].trim();
            if !name.is_empty() {
                graph.set_name(name);
            }
        } else if lower.starts_with("*vertices") {
            let count = trimmed
                .split_whitespace()
                .nth(1)
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| invalid(lineno, "expected '*vertices <count>'"))?;

            for _ in 0..count {
                let (lineno, line) = lines
                    .next()
                    .ok_or_else(|| invalid(lineno, "file ends before all vertices are listed"))?;
                let tokens = tokenize(line).map_err(|e| invalid(lineno, &e))?;
                if tokens.len() < 2 {
                    return Err(invalid(lineno, "vertex line needs an id and a label"));
                }
                graph.ensure_node(&tokens[1]);
                labels.insert(tokens[0].clone(), tokens[1].clone());
            }
        } else if lower.starts_with("*edges") || lower.starts_with("*arcs") {
            // Edge lines run to the end of the file
            for (lineno, line) in lines.by_ref() {
                let tokens = tokenize(line).map_err(|e| invalid(lineno, &e))?;
                if tokens.len() < 2 {
                    continue;
                }
                let a = labels.get(&tokens[0]).unwrap_or(&tokens[0]).clone();
                let b = labels.get(&tokens[1]).unwrap_or(&tokens[1]).clone();

                // tokens[2] is the weight; attributes follow as key/value pairs
                let label = tokens
                    .get(3..)
                    .unwrap_or(&[])
                    .chunks(2)
                    .find(|pair| pair.len() == 2 && pair[0] == "label")
                    .map(|pair| pair[1].clone())
                    .unwrap_or_default();

                graph.add_edge(&a, &b, label);
            }
        } else if lower.starts_with("*matrix") {
            return Err(invalid(lineno, "matrix sections are not supported"));
        } else {
            return Err(invalid(lineno, &format!("unexpected line '{}'", trimmed)));
        }
    }

    Ok(graph)
}

fn invalid(lineno: usize, message: &str) -> StoreError {
    StoreError::InvalidData(format!("line {}: {}", lineno + 1, message))
}

/// Quote a token when the tokenizer would otherwise split or unescape it
fn quote(token: &str) -> String {
    if token.is_empty() || token.contains(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '\\')) {
        format!("\"{}\"", escape(token))
    } else {
        token.to_string()
    }
}

fn escape(token: &str) -> String {
    token.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Split a line into shell-like tokens
///
/// Double quotes group and accept `\"` and `\\` escapes, single quotes group
/// literally, a backslash outside quotes escapes the next character.
pub(crate) fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.peek() {
                            Some(&next) if next == '"' || next == '\\' => {
                                current.push(next);
                                chars.next();
                            }
                            _ => current.push('\\'),
                        },
                        Some(other) => current.push(other),
                        None => return Err("unterminated double quote".to_string()),
                    }
                }
            }
            '\'' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(other) => current.push(other),
                        None => return Err("unterminated single quote".to_string()),
                    }
                }
            }
            '\\' => {
                in_token = true;
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            other => {
                in_token = true;
                current.push(other);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
