/// Per-type accessor configuration and generator settings.
use crate::error::{GeneratorError, IoError};
use crate::metadata::loader::read_document;
use crate::metadata::TypeIndex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Options for the accessor generated for one type.
///
/// Declared on a type in the index (optionally naming another `target`, which
/// is how externally owned types get configured) or listed in the generator
/// settings. A type may carry several records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessorConfig {
    /// Type the accessor is generated for; defaults to the declaring type.
    pub target: Option<String>,
    /// Regular expressions; members whose whole name matches are skipped.
    pub ignore: Vec<String>,
    /// Only expose fields and methods without parameters.
    pub properties: bool,
}

impl AccessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_target(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn ignore(mut self, pattern: impl Into<String>) -> Self {
        self.ignore.push(pattern.into());
        self
    }

    pub fn properties(mut self, properties: bool) -> Self {
        self.properties = properties;
        self
    }

    fn merge(records: &[AccessorConfig]) -> AccessorConfig {
        let mut merged = AccessorConfig::default();
        for record in records {
            for pattern in &record.ignore {
                if !merged.ignore.contains(pattern) {
                    merged.ignore.push(pattern.clone());
                }
            }
            merged.properties |= record.properties;
        }
        merged
    }
}

/// Type name to configuration records, resolved once before generation.
#[derive(Debug, Clone, Default)]
pub struct ConfigTable {
    declared: BTreeMap<String, Vec<AccessorConfig>>,
    uncontrolled: BTreeMap<String, Vec<AccessorConfig>>,
}

impl ConfigTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the records declared in `index` plus `extra` side-table
    /// records, each of which must name its target.
    pub fn build(index: &TypeIndex, extra: &[AccessorConfig]) -> Result<Self, GeneratorError> {
        let mut table = ConfigTable::new();
        for info in index.types() {
            for config in &info.accessor_configs {
                match config.target.as_deref() {
                    None => table.declare(&info.name, config.clone()),
                    Some(target) if target == info.name => table.declare(&info.name, config.clone()),
                    Some(target) => table.associate(target, config.clone()),
                }
            }
        }
        for config in extra {
            let target = config
                .target
                .clone()
                .ok_or_else(|| GeneratorError::MissingTarget {
                    declared_on: "generator settings".to_string(),
                })?;
            table.associate(&target, config.clone());
        }
        Ok(table)
    }

    /// Records a configuration declared on the type itself.
    pub fn declare(&mut self, type_name: &str, config: AccessorConfig) {
        self.declared
            .entry(type_name.to_string())
            .or_default()
            .push(config);
    }

    /// Records a configuration for a type owned elsewhere.
    pub fn associate(&mut self, type_name: &str, config: AccessorConfig) {
        self.uncontrolled
            .entry(type_name.to_string())
            .or_default()
            .push(config);
    }

    /// The effective configuration for `type_name`.
    ///
    /// Records declared on the type take precedence over side-table records.
    /// Several records from the winning source are merged.
    pub fn lookup(&self, type_name: &str) -> Option<AccessorConfig> {
        self.declared
            .get(type_name)
            .or_else(|| self.uncontrolled.get(type_name))
            .filter(|records| !records.is_empty())
            .map(|records| AccessorConfig::merge(records))
    }

    /// Every type with at least one record, sorted.
    pub fn configured_types(&self) -> Vec<String> {
        let names: BTreeSet<&String> = self
            .declared
            .keys()
            .chain(self.uncontrolled.keys())
            .collect();
        names.into_iter().cloned().collect()
    }
}

/// Generator-wide settings, usually loaded from a YAML or JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Universal root type; the ancestor walk stops before it.
    pub root_type: String,
    /// Marker type of asynchronous results.
    pub async_type: String,
    /// Namespace roots generated accessors must not be placed in.
    pub reserved_namespaces: Vec<String>,
    /// Namespace used instead of a reserved one.
    pub fallback_namespace: String,
    /// Appended to the base name of every artifact.
    pub suffix: String,
    /// Side-table configuration for externally owned types.
    pub uncontrolled: Vec<AccessorConfig>,
    /// Types to generate accessors for in addition to configured ones.
    pub types: Vec<String>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            root_type: "Object".to_string(),
            async_type: "core::future::Future".to_string(),
            reserved_namespaces: vec!["std".to_string(), "core".to_string(), "alloc".to_string()],
            fallback_namespace: "template_resolve::generated".to_string(),
            suffix: "ValueResolver".to_string(),
            uncontrolled: Vec::new(),
            types: Vec::new(),
        }
    }
}

impl GeneratorSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, IoError> {
        read_document(path.as_ref())
    }

    pub fn is_reserved(&self, namespace: &str) -> bool {
        let root = namespace.split("::").next().unwrap_or(namespace);
        self.reserved_namespaces.iter().any(|r| r == root)
    }
}
