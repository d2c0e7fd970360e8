//! Named collection of standards profiles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::profile::StandardsProfile;

/// Registry of standards profiles keyed by name.
///
/// Pure lookup, no side effects. The registry is shared, read-only
/// configuration; callers construct it once and hand out references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardsRegistry {
    profiles: BTreeMap<String, StandardsProfile>,
}

impl StandardsRegistry {
    /// The built-in registry carrying the "default" and "strict" profiles.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.register(StandardsProfile::default_profile());
        registry.register(StandardsProfile::strict_profile());
        registry
    }

    /// Adds or replaces a profile under its own name.
    pub fn register(&mut self, profile: StandardsProfile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    pub fn get(&self, name: &str) -> Option<&StandardsProfile> {
        self.profiles.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_present() {
        let registry = StandardsRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["default", "strict"]);
        assert!(registry.get("default").is_some());
        assert!(registry.get("chicago").is_none());
    }

    #[test]
    fn test_custom_profile_overrides_by_name() {
        let mut registry = StandardsRegistry::builtin();
        let mut custom = StandardsProfile::default_profile();
        custom.min_diameter = 18.0;
        registry.register(custom);
        assert_eq!(registry.get("default").unwrap().min_diameter, 18.0);
    }
}
