//! Admin1 boundary `FeatureCollection` loading.

use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use geojson::{Feature, FeatureCollection, GeoJson, JsonObject};

use crate::GeometryLoadError;
use crate::name_key::NameKey;

/// Region polygons parsed from a `GeoJSON` `FeatureCollection`.
///
/// Read-only once loaded. Feature property maps are exposed as-is because
/// the property holding the region name differs between boundary
/// providers.
#[derive(Debug, Clone)]
pub struct RegionGeometry {
    collection: FeatureCollection,
}

impl RegionGeometry {
    /// Loads a boundary file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryLoadError`] if the file cannot be read, is not
    /// valid `GeoJSON`, or is not a `FeatureCollection`.
    pub fn load(path: &Path) -> Result<Self, GeometryLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| GeometryLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let geometry: Self = contents.parse()?;
        log::info!(
            "Loaded {} boundary features from {}",
            geometry.features().len(),
            path.display()
        );

        Ok(geometry)
    }

    /// All features in file order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.collection.features
    }

    /// The underlying collection, for embedding in rendered output.
    #[must_use]
    pub const fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    /// Property map of the first feature, used to sniff the name key.
    #[must_use]
    pub fn first_properties(&self) -> Option<&JsonObject> {
        self.collection.features.first()?.properties.as_ref()
    }

    /// String values of the `key` property across all features. Features
    /// without the property, or with a non-string value, are skipped.
    #[must_use]
    pub fn feature_names(&self, key: &NameKey) -> Vec<&str> {
        self.collection
            .features
            .iter()
            .filter_map(|feature| feature.property(key.property()))
            .filter_map(serde_json::Value::as_str)
            .collect()
    }

    /// Matches tabular region names against feature names under `key`.
    #[must_use]
    pub fn match_regions<'a, I>(&self, key: &NameKey, regions: I) -> RegionMatch
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: BTreeSet<&str> = self.feature_names(key).into_iter().collect();

        let mut report = RegionMatch::default();
        for region in regions.into_iter().collect::<BTreeSet<_>>() {
            if names.contains(region) {
                report.matched.push(region.to_string());
            } else {
                report.unmatched.push(region.to_string());
            }
        }
        report
    }
}

impl FromStr for RegionGeometry {
    type Err = GeometryLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => Ok(Self { collection }),
            GeoJson::Feature(_) => Err(GeometryLoadError::NotFeatureCollection {
                found: "Feature",
            }),
            GeoJson::Geometry(_) => Err(GeometryLoadError::NotFeatureCollection {
                found: "Geometry",
            }),
        }
    }
}

/// Outcome of joining tabular region names to boundary features.
///
/// Unmatched regions render without data; this is reported, not fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMatch {
    /// Distinct region names that have a feature, sorted.
    pub matched: Vec<String>,
    /// Distinct region names with no feature, sorted.
    pub unmatched: Vec<String>,
}
