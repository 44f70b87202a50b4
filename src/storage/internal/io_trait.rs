use std::path::Path;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::{fs, io};
use uuid::Uuid;
use crate::rng::make_uuid;

#[async_trait]
pub trait NoteStoreIo: Send + Sync {
    async fn metadata(&self, path: &Path) -> io::Result<Metadata>;

    async fn open_file(&self, path: &Path) -> io::Result<OpenFile>;

    async fn write_file(&self, path: &Path, data: Vec<u8>) -> io::Result<()>;

    async fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()>;

    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn generate_uuid(&self) -> Uuid;
}

pub struct Metadata {
    pub is_dir: bool,
}

pub struct OpenFile {
    pub file: Box<dyn io::AsyncRead + Unpin + Send>,
    pub size: u64,
}

pub struct ProductionNoteStoreIo;

impl ProductionNoteStoreIo {
    pub fn new() -> Self {
        ProductionNoteStoreIo
    }
}

#[async_trait]
impl NoteStoreIo for ProductionNoteStoreIo {
    async fn metadata(&self, path: &Path) -> io::Result<Metadata> {
        let meta = fs::metadata(path).await?;
        Ok(Metadata { is_dir: meta.is_dir() })
    }

    async fn open_file(&self, path: &Path) -> io::Result<OpenFile> {
        let file = fs::File::open(path).await?;
        let metadata = file.metadata().await?;
        Ok(
            OpenFile {
                file: Box::new(file),
                size: metadata.len(),
            }
        )
    }

    async fn write_file(&self, path: &Path, data: Vec<u8>) -> io::Result<()> {
        let mut file = fs::File::create(path).await?;
        file.write_all(&data).await?;
        // the rename that follows must not expose a half-flushed file
        file.sync_all().await
    }

    async fn rename_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    fn generate_uuid(&self) -> Uuid {
        make_uuid(&mut rand::rng())
    }
}
