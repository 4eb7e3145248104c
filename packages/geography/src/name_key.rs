//! Region name property resolution.
//!
//! Boundary providers disagree on which feature property holds the Admin1
//! name (`ADM1_EN`, `admin1Name`, `name`, ...). The first feature's
//! properties are checked against an ordered preference list. When nothing
//! matches, the default key is used anyway: the map then renders blank,
//! which is logged but not treated as an error.

use geojson::JsonObject;

/// How a [`NameKey`] was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResolution {
    /// Set explicitly in configuration; no sniffing was done.
    Configured,
    /// Found in the first feature's properties.
    Matched,
    /// No candidate was present; the default key was used.
    Fallback,
}

/// The feature property holding region names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameKey {
    property: String,
    resolution: KeyResolution,
}

impl NameKey {
    /// A key named explicitly in configuration.
    #[must_use]
    pub fn configured(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            resolution: KeyResolution::Configured,
        }
    }

    /// Property name, e.g. `ADM1_EN`.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// How this key was chosen.
    #[must_use]
    pub const fn resolution(&self) -> KeyResolution {
        self.resolution
    }

    /// Whether resolution fell back to the default key.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.resolution, KeyResolution::Fallback)
    }

    /// Path of the property from the feature root, e.g.
    /// `properties.ADM1_EN`.
    #[must_use]
    pub fn feature_id_key(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for NameKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "properties.{}", self.property)
    }
}

/// Picks the first of `preferences` present in `properties`, falling back to
/// `default` when none is (or when there are no properties at all).
#[must_use]
pub fn resolve_name_key(
    properties: Option<&JsonObject>,
    preferences: &[String],
    default: &str,
) -> NameKey {
    let found = properties.and_then(|props| {
        preferences
            .iter()
            .find(|candidate| props.contains_key(candidate.as_str()))
    });

    if let Some(property) = found {
        log::debug!("Resolved region name key to '{property}'");
        return NameKey {
            property: property.clone(),
            resolution: KeyResolution::Matched,
        };
    }

    log::warn!(
        "None of the name keys {preferences:?} are present in the boundary \
         properties; falling back to '{default}' (the map may render blank)"
    );
    NameKey {
        property: default.to_string(),
        resolution: KeyResolution::Fallback,
    }
}
