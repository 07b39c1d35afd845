use std::collections::HashMap;

/// Flat name to content store.
pub trait FileStore: Send {
    /// Inserts or overwrites unconditionally.
    fn create(&mut self, name: &str, content: &str);

    fn read(&self, name: &str) -> Result<String, FileError>;

    fn exists(&self, name: &str) -> bool {
        self.read(name).is_ok()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryFileStore {
    files: HashMap<String, String>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileStore for InMemoryFileStore {
    fn create(&mut self, name: &str, content: &str) {
        if self
            .files
            .insert(name.to_string(), content.to_string())
            .is_some()
        {
            tracing::debug!(name, "File overwritten");
        } else {
            tracing::debug!(name, "File created");
        }
    }

    fn read(&self, name: &str) -> Result<String, FileError> {
        self.files.get(name).cloned().ok_or_else(|| {
            tracing::warn!(name, "File not found");
            FileError::NotFound(name.to_string())
        })
    }

    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    fn len(&self) -> usize {
        self.files.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),
}
