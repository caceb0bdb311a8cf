//! `${VAR}` and `${VAR:-default}` substitution in path settings.

use std::borrow::Cow;

use crate::ConfigError;

/// Substitute environment variables in the value of `field`.
///
/// A reference to an unset variable without a `:-` default is an error.
/// A literal `$` not followed by `{` is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| std::env::var(name).map(Some))
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}}: {}", e.var_name, e.cause),
        })
}
