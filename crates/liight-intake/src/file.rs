//! Candidate upload files and the byte sources behind them.

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Asynchronous access to a file's bytes. Reads may suspend.
#[async_trait]
pub trait FileContent: Send + Sync {
    /// Read at most `len` bytes from the start of the content.
    async fn read_prefix(&self, len: usize) -> io::Result<Vec<u8>>;

    /// Read the whole content.
    async fn read_all(&self) -> io::Result<Vec<u8>>;
}

/// Content already held in memory.
#[derive(Clone)]
pub struct MemoryContent(Bytes);

impl MemoryContent {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(data.into())
    }
}

#[async_trait]
impl FileContent for MemoryContent {
    async fn read_prefix(&self, len: usize) -> io::Result<Vec<u8>> {
        let end = len.min(self.0.len());
        Ok(self.0[..end].to_vec())
    }

    async fn read_all(&self) -> io::Result<Vec<u8>> {
        Ok(self.0.to_vec())
    }
}

/// Content read lazily from the filesystem.
#[derive(Clone, Debug)]
pub struct PathContent {
    path: PathBuf,
}

impl PathContent {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FileContent for PathContent {
    async fn read_prefix(&self, len: usize) -> io::Result<Vec<u8>> {
        let file = tokio::fs::File::open(&self.path).await?;
        let mut buf = Vec::with_capacity(len);
        file.take(len as u64).read_to_end(&mut buf).await?;
        Ok(buf)
    }

    async fn read_all(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// A single candidate upload as the user selected it.
///
/// Selecting another file creates a new `SubmissionFile`; existing values are
/// never mutated.
#[derive(Clone)]
pub struct SubmissionFile {
    name: String,
    mime_type: String,
    size_bytes: u64,
    content: Arc<dyn FileContent>,
}

impl SubmissionFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        content: Arc<dyn FileContent>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            content,
        }
    }

    /// In-memory file whose size is the length of `data`.
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let data = data.into();
        let size = data.len() as u64;
        Self::new(name, mime_type, size, Arc::new(MemoryContent::new(data)))
    }

    /// File on disk. Name and size come from the path; the MIME type is what
    /// the caller declares (the browser-supplied type in the original flow).
    pub async fn from_path(path: impl Into<PathBuf>, mime_type: impl Into<String>) -> io::Result<Self> {
        let path = path.into();
        let metadata = tokio::fs::metadata(&path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        Ok(Self::new(
            name,
            mime_type,
            metadata.len(),
            Arc::new(PathContent::new(path)),
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub async fn read_prefix(&self, len: usize) -> io::Result<Vec<u8>> {
        self.content.read_prefix(len).await
    }

    pub async fn read_all(&self) -> io::Result<Vec<u8>> {
        self.content.read_all().await
    }
}

impl fmt::Debug for SubmissionFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}
