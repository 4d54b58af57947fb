//! YAML parser for profile definitions
//!
//! Parses and validates profile YAML files.
//! Supports both built-in profiles (by name) and custom YAML files (by path).

use crate::config::Profile;
use crate::error::{Error, Result};
use crate::profiles;
use crate::template;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a profile from a name or file path, interpolating the environment
///
/// This function first checks if the input is a built-in profile name (e.g., "sdwan"),
/// then falls back to loading from a file path.
///
/// # Examples
///
/// ```ignore
/// // Load built-in profile by name
/// let profile = load_profile("dnac")?;
///
/// // Load custom profile from file
/// let profile = load_profile("./lab-vmanage.yaml")?;
/// ```
pub fn load_profile(path: impl AsRef<Path>) -> Result<Profile> {
    let yaml = read_profile_source(path.as_ref())?;
    load_profile_from_str(&yaml)
}

/// Load a profile from a YAML string, interpolating the environment
pub fn load_profile_from_str(yaml: &str) -> Result<Profile> {
    load_profile_with(yaml, |name| std::env::var(name).ok())
}

/// Load a profile from a YAML string with a custom variable lookup
pub fn load_profile_with<F>(yaml: &str, lookup: F) -> Result<Profile>
where
    F: Fn(&str) -> Option<String>,
{
    let mut doc: serde_yaml::Value = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse profile YAML: {e}")))?;

    template::render_yaml(&mut doc, &lookup)?;

    let profile: Profile = serde_yaml::from_value(doc)
        .map_err(|e| Error::config(format!("Invalid profile definition: {e}")))?;

    profile.validate()?;
    debug!("Loaded profile '{}' ({})", profile.name, profile.base_url);
    Ok(profile)
}

/// Parse a profile without interpolating or validating it
///
/// Placeholders stay as written, which is enough to describe a profile
/// (names, requests) when its environment is not set up.
pub fn parse_profile_raw(path: impl AsRef<Path>) -> Result<Profile> {
    let yaml = read_profile_source(path.as_ref())?;
    serde_yaml::from_str(&yaml)
        .map_err(|e| Error::config(format!("Failed to parse profile YAML: {e}")))
}

/// Resolve a built-in name or read a file
fn read_profile_source(path: &Path) -> Result<String> {
    let path_str = path.to_string_lossy();

    // A built-in name has no path separators and no .yaml extension
    if !path_str.contains('/')
        && !path_str.contains('\\')
        && !path_str.ends_with(".yaml")
        && !path_str.ends_with(".yml")
    {
        if let Some(yaml) = profiles::get_builtin(&path_str) {
            return Ok(yaml.to_string());
        }
    }

    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config(format!(
                "Profile '{}' not found. Built-in profiles: {}. Or provide a path to a YAML file.",
                path.display(),
                profiles::list_builtin().join(", ")
            ))
        } else {
            Error::Io(e)
        }
    })
}
