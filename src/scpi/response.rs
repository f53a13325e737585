//! Helpers for picking typed values out of instrument reply text.
//!
//! Instruments answer in a small set of shapes: NR1/NR2/NR3 numerics
//! (optionally with a leading `+`), `0`/`1`/`ON`/`OFF` booleans, quoted
//! strings, and comma-separated tuples whose string fields may themselves
//! contain commas inside quotes. Every parser here takes the command
//! header it is parsing for, so failures name the offending exchange.

use std::str::FromStr;

use super::error::ScpiError;

/// Strips the trailing terminator and surrounding whitespace.
pub fn trim(response: &str) -> &str {
    response.trim()
}

/// Removes one layer of single or double quotes, if present.
pub fn unquote(field: &str) -> &str {
    let t = field.trim();
    if t.len() >= 2
        && ((t.starts_with('"') && t.ends_with('"'))
            || (t.starts_with('\'') && t.ends_with('\'')))
    {
        &t[1..t.len() - 1]
    } else {
        t
    }
}

/// Parses an NR1/NR2/NR3 numeric response. Instruments commonly prefix
/// positive values with `+`, which Rust's float parsers accept but the
/// integer parsers do not.
pub fn parse_num<T>(command: &str, response: &str) -> Result<T, ScpiError>
where
    T: FromStr,
{
    let t = trim(response);
    let t = t.strip_prefix('+').unwrap_or(t);
    t.parse()
        .map_err(|_| ScpiError::response(command, format!("not a numeric value: {:?}", t)))
}

/// Parses a `0`/`1`/`ON`/`OFF` boolean response.
pub fn parse_bool(command: &str, response: &str) -> Result<bool, ScpiError> {
    let t = trim(response);
    match t.strip_prefix('+').unwrap_or(t).to_ascii_uppercase().as_str() {
        "1" | "ON" => Ok(true),
        "0" | "OFF" => Ok(false),
        other => Err(ScpiError::response(
            command,
            format!("not a boolean value: {:?}", other),
        )),
    }
}

/// Parses a mnemonic response into a settings enum, accepting short and
/// long forms in any case.
pub fn parse_setting<T: FromStr>(command: &str, response: &str) -> Result<T, ScpiError> {
    let t = unquote(trim(response));
    T::from_str(t)
        .map_err(|_| ScpiError::response(command, format!("unrecognized mnemonic: {:?}", t)))
}

/// Splits a comma-separated response, honoring quoted fields. A field
/// like `"STATE1,STAT,128"` stays in one piece.
pub fn fields(response: &str) -> Vec<&str> {
    let t = trim(response);
    if t.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in t.char_indices() {
        match (quote, c) {
            (None, '"') | (None, '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, ',') => {
                out.push(t[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(t[start..].trim());
    out
}

/// Splits a response into exactly `n` comma-separated fields.
pub fn expect_fields<'a>(
    command: &str,
    response: &'a str,
    n: usize,
) -> Result<Vec<&'a str>, ScpiError> {
    let v = fields(response);
    if v.len() != n {
        return Err(ScpiError::response(
            command,
            format!("expected {} fields, got {}", n, v.len()),
        ));
    }
    Ok(v)
}

/// Parses a homogeneous comma-separated list. An empty response is an
/// empty list.
pub fn parse_list<T>(command: &str, response: &str) -> Result<Vec<T>, ScpiError>
where
    T: FromStr,
{
    fields(response)
        .into_iter()
        .map(|f| parse_num(command, f))
        .collect()
}
