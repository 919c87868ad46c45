use std::collections::BTreeMap;

/// Interpolate `${name}` references in a string using the `[versions]` table.
///
/// Returns the name of the first undefined variable as the error, so callers
/// can report it against the field that used it.
pub fn interpolate(input: &str, versions: &BTreeMap<String, String>) -> Result<String, String> {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let end = start + len;
        let key = rest[start + 2..end].trim();
        let value = versions.get(key).ok_or_else(|| key.to_string())?;
        result.push_str(&rest[..start]);
        result.push_str(value);
        rest = &rest[end + 1..];
    }
    result.push_str(rest);
    Ok(result)
}
