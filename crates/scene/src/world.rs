use crate::feature::Feature;

/// Immutable named feature collections produced by one dataset load.
///
/// Collections are addressed by string key (the decoded topology's object
/// names, e.g. "countries" and "cities"). The store itself is append-only:
/// it is populated during ingest and only read afterward.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct World {
    collections: Vec<(String, Vec<Feature>)>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_collection(&mut self, name: impl Into<String>, features: Vec<Feature>) {
        let name = name.into();
        if let Some(slot) = self.collections.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = features;
        } else {
            self.collections.push((name, features));
        }
    }

    pub fn collection(&self, name: &str) -> &[Feature] {
        self.collections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f.as_slice())
            .unwrap_or(&[])
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(|(n, _)| n.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.collections.iter().all(|(_, f)| f.is_empty())
    }

    /// Min/max of a numeric property across a collection.
    ///
    /// Features without the property are skipped; `None` when nothing
    /// carries it. Used as the domain of the color and radius scales.
    pub fn property_extent(&self, collection: &str, key: &str) -> Option<(f64, f64)> {
        let mut extent: Option<(f64, f64)> = None;
        for feature in self.collection(collection) {
            let Some(value) = feature.number_property(key) else {
                continue;
            };
            if !value.is_finite() {
                continue;
            }
            extent = Some(match extent {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }
        extent
    }
}
