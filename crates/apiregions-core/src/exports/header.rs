//! Parser for OSGi manifest clause headers such as `Export-Package`.
//!
//! Grammar:
//!
//! ```text
//! header    = clause ( ',' clause )*
//! clause    = path ( ';' path )* ( ';' parameter )*
//! parameter = name ( '=' | ':=' ) value
//! value     = token | '"' quoted '"'
//! ```
//!
//! Quoted values may contain `,` and `;`. Each path of a multi-path clause
//! shares the clause's parameters.

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{ApiRegionsError, Result};

/// One clause of a header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clause {
    pub paths: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub directives: BTreeMap<String, String>,
}

/// Parse a header into its clauses
///
/// Blank clauses (e.g. from a trailing comma) are skipped.
///
/// # Errors
/// * `MalformedExportHeader` - unterminated quote, a clause without a path,
///   a path after a parameter, or a parameter without a name
pub fn parse_header(header: &str) -> Result<Vec<Clause>> {
    let malformed = |reason: &str| ApiRegionsError::MalformedExportHeader {
        header: header.to_string(),
        reason: reason.to_string(),
    };

    let mut clauses = Vec::new();
    for raw_clause in split_unquoted(header, ',').map_err(|r| malformed(&r))? {
        if raw_clause.trim().is_empty() {
            continue;
        }

        let mut clause = Clause::default();
        for piece in split_unquoted(&raw_clause, ';').map_err(|r| malformed(&r))? {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }

            match split_parameter(piece) {
                Some((name, value, is_directive)) => {
                    if name.is_empty() {
                        return Err(malformed("parameter without a name"));
                    }
                    let value = unquote(value);
                    if is_directive {
                        clause.directives.insert(name.to_string(), value);
                    } else {
                        clause.attributes.insert(name.to_string(), value);
                    }
                }
                None => {
                    if !clause.attributes.is_empty() || !clause.directives.is_empty() {
                        return Err(malformed("path after parameter"));
                    }
                    clause.paths.push(piece.to_string());
                }
            }
        }

        if clause.paths.is_empty() {
            return Err(malformed("clause has no path"));
        }
        clauses.push(clause);
    }

    Ok(clauses)
}

/// Package names exported by a header, with versions and attributes dropped
///
/// # Errors
/// Same as [`parse_header`].
pub fn export_names(header: &str) -> Result<BTreeSet<String>> {
    Ok(parse_header(header)?
        .into_iter()
        .flat_map(|c| c.paths)
        .collect())
}

/// Split on `sep`, ignoring separators inside double quotes
fn split_unquoted(input: &str, sep: char) -> std::result::Result<Vec<String>, String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            c if c == sep && !in_quotes => parts.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted value".to_string());
    }
    parts.push(current);
    Ok(parts)
}

/// Split `name=value` or `name:=value`; `None` for a bare path
fn split_parameter(piece: &str) -> Option<(&str, &str, bool)> {
    let eq = first_unquoted(piece, '=')?;
    let (name, is_directive) = match piece[..eq].strip_suffix(':') {
        Some(name) => (name, true),
        None => (&piece[..eq], false),
    };
    Some((name.trim(), piece[eq + 1..].trim(), is_directive))
}

fn first_unquoted(input: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    for (idx, ch) in input.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == target && !in_quotes => return Some(idx),
            _ => {}
        }
    }
    None
}

fn unquote(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .to_string()
}
