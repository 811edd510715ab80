//! Substitute logged parameter values into a prepared SQL statement.
//!
//! MyBatis logs a statement as two lines:
//!
//! ```text
//! ==>  Preparing: SELECT * FROM users WHERE id = ? AND name = ?
//! ==> Parameters: 1(Integer), tom(String)
//! ```
//!
//! [`format_sql`] turns them back into runnable SQL for display.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static PARAMETER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\b.*)\((\S+)\)").expect("parameter regex"));

const PARAMETERS_MARKER: &str = "Parameters:";

/// A parameter value with the literal form it takes in SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlLiteral {
    /// Integer-typed value, written bare
    Integer(i64),
    /// Any other typed value, written as a quoted string
    Text(String),
    /// Untagged or unparseable value, written verbatim
    Raw(String),
}

impl std::fmt::Display for SqlLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Self::Raw(value) => f.write_str(value),
        }
    }
}

/// Parse one `value(Type)` entry.
#[must_use]
pub fn parse_parameter(entry: &str) -> SqlLiteral {
    let Some(captures) = PARAMETER_PATTERN.captures(entry) else {
        return SqlLiteral::Raw(entry.trim().to_string());
    };
    let value = captures.get(1).map_or("", |m| m.as_str());
    let tag = captures.get(2).map_or("", |m| m.as_str());

    match tag {
        "Integer" | "Long" | "Short" | "Byte" => value.trim().parse::<i64>().map_or_else(
            |_| {
                tracing::debug!(value, tag, "Unparseable integer parameter");
                SqlLiteral::Raw(value.to_string())
            },
            SqlLiteral::Integer,
        ),
        _ => SqlLiteral::Text(value.to_string()),
    }
}

/// Parse `value(Type)` entries in order.
pub fn parse_parameters<S: AsRef<str>>(entries: &[S]) -> Vec<SqlLiteral> {
    entries
        .iter()
        .map(|entry| parse_parameter(entry.as_ref()))
        .collect()
}

/// Split a logged parameters line into its entries.
///
/// A leading `==> Parameters:` log prefix is dropped.
#[must_use]
pub fn split_parameters_line(line: &str) -> Vec<&str> {
    let line = line
        .find(PARAMETERS_MARKER)
        .map_or(line, |index| &line[index + PARAMETERS_MARKER.len()..]);
    let line = line.trim_start().trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Vec::new();
    }
    line.split(", ").collect()
}

/// Replace `?` placeholders outside quoted strings with `parameters`, in order.
///
/// A blank template or an empty parameter list gives an empty string.
/// Placeholders beyond the last parameter are left as `?`.
#[must_use]
pub fn format_sql(template: &str, parameters: &[SqlLiteral]) -> String {
    if template.trim().is_empty() || parameters.is_empty() {
        return String::new();
    }

    let mut sql = String::with_capacity(template.len());
    let mut values = parameters.iter();
    let mut quote: Option<char> = None;

    for c in template.chars() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == '?' => {
                if let Some(value) = values.next() {
                    sql.push_str(&value.to_string());
                    continue;
                }
            }
            None => {}
        }
        sql.push(c);
    }

    if values.next().is_some() {
        tracing::debug!("More parameters than placeholders");
    }
    sql
}
