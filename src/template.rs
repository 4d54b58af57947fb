//! Template interpolation for profiles
//!
//! Two kinds of placeholder are handled:
//! - `${VAR}` and `${VAR:-default}` in profile YAML, resolved from the
//!   environment when a profile is loaded
//! - `{name}` in request paths, resolved from parameters given at run time
//!   (e.g. `/organizations/{org_id}/networks`)

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex for environment placeholders: ${VAR} or ${VAR:-default}
static ENV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").unwrap()
});

/// Regex for path parameters: {name}
static PARAM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Render `${VAR}` placeholders with a custom lookup
///
/// A variable the lookup does not know falls back to its `:-default`; with no
/// default it is an error. All missing names are reported together.
pub fn render_with<F>(template: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = Vec::new();

    let rendered = ENV_REGEX.replace_all(template, |cap: &regex::Captures<'_>| {
        let name = &cap[1];
        match lookup(name) {
            Some(value) => value,
            None => match cap.get(2) {
                Some(default) => default.as_str().to_string(),
                None => {
                    missing.push(name.to_string());
                    String::new()
                }
            },
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::missing_field(format!(
            "environment variable {}",
            missing.join(", ")
        )))
    }
}

/// Check if a string contains `${VAR}` placeholders
pub fn has_templates(s: &str) -> bool {
    ENV_REGEX.is_match(s)
}

/// Extract all environment variable names from a template
pub fn extract_variables(template: &str) -> Vec<String> {
    ENV_REGEX
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Render every string inside a YAML document
///
/// Placeholders only ever expand inside string scalars, so a value carrying
/// YAML syntax (`#`, `: `) cannot change the document's structure.
pub fn render_yaml<F>(value: &mut serde_yaml::Value, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    match value {
        serde_yaml::Value::String(s) => {
            if has_templates(s) {
                *s = render_with(s, lookup)?;
            }
        }
        serde_yaml::Value::Sequence(items) => {
            for item in items {
                render_yaml(item, lookup)?;
            }
        }
        serde_yaml::Value::Mapping(map) => {
            for (_, item) in map.iter_mut() {
                render_yaml(item, lookup)?;
            }
        }
        serde_yaml::Value::Tagged(tagged) => render_yaml(&mut tagged.value, lookup)?,
        serde_yaml::Value::Null | serde_yaml::Value::Bool(_) | serde_yaml::Value::Number(_) => {}
    }
    Ok(())
}

/// Substitute `{name}` path parameters
pub fn render_path(path: &str, params: &HashMap<String, String>) -> Result<String> {
    let mut missing = Vec::new();

    let rendered = PARAM_REGEX.replace_all(path, |cap: &regex::Captures<'_>| {
        let name = &cap[1];
        match params.get(name) {
            Some(value) => value.clone(),
            None => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::config(format!(
            "Missing path parameter(s) {} for '{path}'; pass them with --param name=value",
            missing.join(", ")
        )))
    }
}

/// Names of the `{name}` parameters a path expects
pub fn path_params(path: &str) -> Vec<String> {
    PARAM_REGEX
        .captures_iter(path)
        .map(|cap| cap[1].to_string())
        .collect()
}
