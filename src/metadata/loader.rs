use super::{TypeIndex, TypeInfo};
use crate::error::IoError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Index document format understood by this loader. Documents without a
/// `version` are read as this version.
pub const INDEX_VERSION: &str = "1";

#[derive(Debug, Deserialize)]
struct IndexFile {
    #[serde(default)]
    version: Option<String>,
    types: Vec<TypeInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match extension {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(IoError::unsupported_format(extension)),
        }
    }
}

/// Reads and deserializes a JSON or YAML document, picked by extension.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, IoError> {
    if !path.exists() {
        return Err(IoError::file_not_found(path));
    }
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| IoError::read_error(path, e))?;

    match format {
        DocumentFormat::Json => {
            serde_json::from_str(&content).map_err(|e| IoError::parse_error(path, e.to_string()))
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(&content).map_err(|e| IoError::parse_error(path, e.to_string()))
        }
    }
}

/// Loads an index from a single file or from every JSON/YAML file below a
/// directory. A type defined twice is an error.
pub fn load_index<P: AsRef<Path>>(path: P) -> Result<TypeIndex, IoError> {
    let path = path.as_ref();
    let mut index = TypeIndex::new();

    if path.is_dir() {
        let mut files: Vec<_> = WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| DocumentFormat::from_path(e.path()).is_ok())
            .map(|e| e.into_path())
            .collect();
        files.sort();
        for file in files {
            load_into(&mut index, &file)?;
        }
    } else {
        load_into(&mut index, path)?;
    }

    debug!(path = %path.display(), types = index.len(), "loaded type index");
    Ok(index)
}

fn load_into(index: &mut TypeIndex, path: &Path) -> Result<(), IoError> {
    trace!(path = %path.display(), "loading index file");
    let file: IndexFile = read_document(path)?;
    if let Some(version) = file.version.as_deref() {
        if version != INDEX_VERSION {
            return Err(IoError::parse_error(
                path,
                format!("unsupported index version '{version}' (expected {INDEX_VERSION})"),
            ));
        }
    }
    for info in file.types {
        let name = info.name.clone();
        if index.insert(info).is_some() {
            return Err(IoError::duplicate_type(name, path));
        }
    }
    Ok(())
}
