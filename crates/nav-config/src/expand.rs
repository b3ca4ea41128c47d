//! Environment variable expansion for configuration strings.

use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

/// Regex to match a braced variable reference (e.g., `${HOST:-localhost}`).
static BRACED_VAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{[^}]*\}").unwrap());

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// A `$` outside braces is kept as is. `field` is the dotted config path
/// reported when a variable is unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(value.len());
    let mut last_end = 0;
    for m in BRACED_VAR_RE.find_iter(value) {
        result.push_str(&value[last_end..m.start()]);
        let expanded = shellexpand::env(m.as_str()).map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: e.to_string(),
        })?;
        result.push_str(&expanded);
        last_end = m.end();
    }
    result.push_str(&value[last_end..]);
    Ok(result)
}
