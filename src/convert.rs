//! Argument extraction from MCP tool calls.
//!
//! Tool arguments arrive as an untyped JSON object. These helpers pull typed
//! values out of it, treating `null` the same as an absent key, and report
//! missing or mistyped arguments as parameter errors.

use serde_json::{Map, Value as JsonValue};

use crate::error::{McpError, Result};

/// Tool call arguments.
pub type Args = Map<String, JsonValue>;

fn present<'a>(args: &'a Args, name: &str) -> Option<&'a JsonValue> {
    args.get(name).filter(|v| !v.is_null())
}

/// Helper to get a required, non-empty string argument.
pub fn get_string_arg(args: &Args, name: &str) -> Result<String> {
    match get_optional_string(args, name)? {
        Some(s) if !s.trim().is_empty() => Ok(s),
        Some(_) => Err(McpError::invalid_arg(name, "must not be empty")),
        None => Err(McpError::MissingArg(name.to_string())),
    }
}

/// Reject identifiers that URL path normalization would collapse.
///
/// `.` and `..` are dropped or pop a segment when appended to a URL path, which
/// would send the request to a different endpoint.
pub fn check_path_id(name: &str, id: &str) -> Result<()> {
    if id == "." || id == ".." {
        return Err(McpError::invalid_arg(name, format!("'{}' is not a valid identifier", id)));
    }
    Ok(())
}

/// Helper to get a required identifier that will be placed in a URL path.
pub fn get_id_arg(args: &Args, name: &str) -> Result<String> {
    let id = get_string_arg(args, name)?;
    check_path_id(name, &id)?;
    Ok(id)
}

/// Helper to get an optional string argument.
pub fn get_optional_string(args: &Args, name: &str) -> Result<Option<String>> {
    match present(args, name) {
        None => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(McpError::invalid_arg(name, "expected a string")),
    }
}

/// Helper to get an optional non-negative integer argument.
pub fn get_optional_u64(args: &Args, name: &str) -> Result<Option<u64>> {
    match present(args, name) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .map(Some)
            .ok_or_else(|| McpError::invalid_arg(name, "expected a non-negative integer")),
    }
}

/// Helper to get an optional boolean argument.
pub fn get_optional_bool(args: &Args, name: &str) -> Result<Option<bool>> {
    match present(args, name) {
        None => Ok(None),
        Some(v) => v
            .as_bool()
            .map(Some)
            .ok_or_else(|| McpError::invalid_arg(name, "expected a boolean")),
    }
}

/// Helper to get an optional array-of-strings argument.
pub fn get_optional_string_array(args: &Args, name: &str) -> Result<Option<Vec<String>>> {
    let Some(value) = present(args, name) else {
        return Ok(None);
    };
    let arr = value
        .as_array()
        .ok_or_else(|| McpError::invalid_arg(name, "expected an array of strings"))?;

    arr.iter()
        .map(|v| {
            v.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| McpError::invalid_arg(name, "expected an array of strings"))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Resolve an optional page size: default when absent, clamped to `1..=max`.
pub fn page_limit(requested: Option<u64>, default: u64, max: u64) -> u64 {
    requested.unwrap_or(default).clamp(1, max)
}
