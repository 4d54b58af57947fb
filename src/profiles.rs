//! Built-in profile definitions embedded in the binary
//!
//! Every vendor profile under `profiles/` is compiled in, so `--profile sdwan`
//! works without a file on disk. Credentials are never embedded: the YAML
//! refers to environment variables.

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Built-in profile YAML definitions, keyed by name
pub static BUILTIN_PROFILES: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut m = BTreeMap::new();

        // Fabric and campus controllers
        m.insert("apic", include_str!("../profiles/apic.yaml"));
        m.insert("dnac", include_str!("../profiles/dnac.yaml"));
        m.insert("sdwan", include_str!("../profiles/sdwan.yaml"));

        // Orchestration
        m.insert("nso", include_str!("../profiles/nso.yaml"));

        // Cloud-managed
        m.insert("meraki", include_str!("../profiles/meraki.yaml"));
        m.insert("webex", include_str!("../profiles/webex.yaml"));

        m
    });

/// Get a built-in profile by name
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_PROFILES.get(name).copied()
}

/// Check if a name is a built-in profile
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_PROFILES.contains_key(name)
}

/// List all built-in profile names, sorted
pub fn list_builtin() -> Vec<&'static str> {
    BUILTIN_PROFILES.keys().copied().collect()
}
