use std::path::PathBuf;
use std::sync::Arc;

use super::validation;

/// Where the bytes of a selected file come from.
#[derive(Debug, Clone)]
pub enum FileData {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// A file handed to the form by the picker dialog or a drop event, before validation.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub data: FileData,
}

impl FileCandidate {
    pub fn from_path(path: PathBuf) -> std::io::Result<Self> {
        let size = std::fs::metadata(&path)?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self {
            mime: validation::mime_from_name(&name).to_string(),
            name,
            size,
            data: FileData::Path(path),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        let name = name.into();
        Self {
            mime: validation::mime_from_name(&name).to_string(),
            size: bytes.len() as u64,
            name,
            data: FileData::Bytes(bytes),
        }
    }
}

/// A validated file owned by exactly one form.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub data: FileData,
}

impl SelectedFile {
    /// `audio/mpeg` -> `MPEG`
    pub fn type_label(&self) -> String {
        self.mime
            .split('/')
            .nth(1)
            .unwrap_or(&self.mime)
            .to_uppercase()
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.data {
            FileData::Path(path) => tokio::fs::read(path).await,
            FileData::Bytes(bytes) => Ok(bytes.to_vec()),
        }
    }
}

impl From<FileCandidate> for SelectedFile {
    fn from(candidate: FileCandidate) -> Self {
        Self {
            name: candidate.name,
            size: candidate.size,
            mime: candidate.mime,
            data: candidate.data,
        }
    }
}

/// The processed-file reference returned by the API, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedArtifact {
    pub reference: String,
}

impl ProcessedArtifact {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.reference
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .filter(|name| !name.is_empty())
    }
}
