/// Destinations for generated artifacts.
use super::artifact::AccessorArtifact;
use super::codegen;
use super::naming::SEPARATOR;
use crate::engine::Resolver;
use crate::error::GeneratorError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

pub const MANIFEST_FILE: &str = "artifacts.json";

pub trait AccessorSink {
    fn accept(&mut self, artifact: AccessorArtifact) -> Result<(), GeneratorError>;
}

/// Keeps artifacts in memory, ready to be registered in a resolver chain.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Vec<AccessorArtifact>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> &[AccessorArtifact] {
        &self.artifacts
    }

    pub fn into_artifacts(self) -> Vec<AccessorArtifact> {
        self.artifacts
    }

    pub fn into_resolvers(self) -> Vec<Arc<dyn Resolver>> {
        self.artifacts
            .into_iter()
            .map(|artifact| Arc::new(artifact) as Arc<dyn Resolver>)
            .collect()
    }
}

impl AccessorSink for MemorySink {
    fn accept(&mut self, artifact: AccessorArtifact) -> Result<(), GeneratorError> {
        self.artifacts.push(artifact);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WrittenArtifact {
    pub name: String,
    pub target: String,
    pub path: PathBuf,
}

/// Writes each artifact as Rust source under `<root>/<namespace path>/`.
///
/// `finish` writes a manifest of everything written to `artifacts.json`.
#[derive(Debug)]
pub struct SourceDirSink {
    root: PathBuf,
    written: Vec<WrittenArtifact>,
}

impl SourceDirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn written(&self) -> &[WrittenArtifact] {
        &self.written
    }

    fn path_for(&self, artifact: &AccessorArtifact) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(
            artifact
                .namespace()
                .split(SEPARATOR)
                .filter(|segment| !segment.is_empty()),
        );
        path.push(format!("{}.rs", artifact.name()));
        path
    }

    pub fn finish(self) -> Result<Vec<WrittenArtifact>, GeneratorError> {
        let manifest = self.root.join(MANIFEST_FILE);
        fs::create_dir_all(&self.root).map_err(|e| GeneratorError::write(&self.root, e))?;
        let json = serde_json::to_string_pretty(&self.written)
            .map_err(|e| GeneratorError::write(&manifest, e.into()))?;
        fs::write(&manifest, json).map_err(|e| GeneratorError::write(&manifest, e))?;
        Ok(self.written)
    }
}

impl AccessorSink for SourceDirSink {
    fn accept(&mut self, artifact: AccessorArtifact) -> Result<(), GeneratorError> {
        let path = self.path_for(&artifact);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GeneratorError::write(parent, e))?;
        }
        fs::write(&path, codegen::render(&artifact))
            .map_err(|e| GeneratorError::write(&path, e))?;
        debug!(artifact = %artifact.qualified_name(), path = %path.display(), "artifact written");

        self.written.push(WrittenArtifact {
            name: artifact.qualified_name(),
            target: artifact.target().to_string(),
            path,
        });
        Ok(())
    }
}
