//! The thermal-plant registry.
//!
//! A fixed catalog of recognized plants, each with its administrative state
//! and grid region. The canonical names are the single source of truth for
//! what may appear in output; anything extracted for an unknown plant is
//! dropped before presentation. The default catalog ships embedded in the
//! binary and can be overridden with an external YAML file of the same shape.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{MergerError, MergerResult};
use crate::types::PlantRecord;

/// The catalog shipped with the binary.
const DEFAULT_REGISTRY: &str = include_str!("../data/plants.yaml");

#[derive(Debug, Deserialize)]
struct RegistryFile {
    plants: Vec<PlantRecord>,
}

/// Immutable plant catalog, loaded once at startup.
pub struct Registry {
    by_name: HashMap<String, PlantRecord>,
    /// Canonical names sorted ascending; the "All" selection order.
    names: Vec<String>,
}

impl Registry {
    /// Load the embedded default catalog.
    pub fn embedded() -> MergerResult<Self> {
        Self::from_yaml(DEFAULT_REGISTRY)
    }

    /// Load a catalog from an external YAML file.
    pub fn from_file(path: &Path) -> MergerResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    fn from_yaml(content: &str) -> MergerResult<Self> {
        let file: RegistryFile = serde_yaml::from_str(content)?;
        let mut by_name = HashMap::with_capacity(file.plants.len());
        for record in file.plants {
            let name = record.name.clone();
            if by_name.insert(name.clone(), record).is_some() {
                return Err(MergerError::Config(format!(
                    "Duplicate plant in registry: {}",
                    name
                )));
            }
        }
        let mut names: Vec<String> = by_name.keys().cloned().collect();
        names.sort();
        Ok(Self { by_name, names })
    }

    pub fn get(&self, name: &str) -> Option<&PlantRecord> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Canonical names in ascending order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &PlantRecord> {
        self.names.iter().filter_map(|n| self.by_name.get(n))
    }
}
