//! Destinations for rendered artifacts.

use crate::render::error::RenderError;
use crate::types::artifact::Artifact;
use log::debug;
use std::fs;
use std::path::PathBuf;

/// Receives every artifact a pipeline run produces.
pub trait ArtifactSink {
    fn write(&mut self, artifact: Artifact) -> Result<(), RenderError>;
}

/// Writes artifacts into a directory, overwriting files of the same name.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for FileSink {
    fn write(&mut self, artifact: Artifact) -> Result<(), RenderError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| RenderError::OutputDirCreation(self.dir.clone(), e))?;
        let path = self.dir.join(artifact.file_name);
        fs::write(&path, &artifact.bytes).map_err(|e| RenderError::Write(path.clone(), e))?;
        debug!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
        Ok(())
    }
}

/// Keeps artifacts in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub artifacts: Vec<Artifact>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.file_name == file_name)
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, artifact: Artifact) -> Result<(), RenderError> {
        self.artifacts.push(artifact);
        Ok(())
    }
}
