use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use log::{debug, error, trace};
use tokio::io;
use tokio::io::AsyncReadExt;

use crate::config::app_config::AppConfig;
use crate::data::Note;
use crate::lib_constants::TMP_FILENAME_INFIX;
use crate::storage::errors::StoreError;
use io_trait::{NoteStoreIo, ProductionNoteStoreIo};

mod io_trait;

/// Whole-collection persistence.
///
/// `save` replaces the stored collection atomically, but nothing here
/// serializes a `load` followed by a `save`: two such cycles racing each
/// other lose one of the updates. Callers that mutate must hold their own
/// lock across the cycle.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Note>, StoreError>;

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError>;
}

pub type JsonNoteStore = JsonNoteStoreImpl<ProductionNoteStoreIo>;

#[allow(private_bounds)]
pub struct JsonNoteStoreImpl<Io: NoteStoreIo> {
    io: Io,
    path: PathBuf,
    tmp_prefix: OsString,
    max_store_size: u64,
}

impl JsonNoteStore {
    pub async fn new(app_config: &AppConfig) -> Result<JsonNoteStore, StoreError> {
        Self::new_internal(
            app_config.data_file.clone(),
            app_config.max_store_size,
            ProductionNoteStoreIo::new(),
        ).await
    }
}

#[allow(private_bounds)]
impl<Io: NoteStoreIo> JsonNoteStoreImpl<Io> {
    async fn new_internal(
        path: PathBuf,
        max_store_size: u64,
        io: Io,
    ) -> Result<JsonNoteStoreImpl<Io>, StoreError> {
        debug!("creating note store at \"{}\"", path.display());
        let mut tmp_prefix = path.file_name()
            .ok_or(StoreError::InvalidDataFile)?
            .to_os_string();
        tmp_prefix.push(TMP_FILENAME_INFIX);
        let data_dir = path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        match io.metadata(data_dir).await {
            Ok(meta) if meta.is_dir => {},
            Ok(_) => return Err(StoreError::DataDirNotInitialized),
            Err(e) if e.kind() == ErrorKind::NotFound =>
                return Err(StoreError::DataDirNotInitialized),
            Err(e) => return Err(e.into()),
        }
        Ok(
            JsonNoteStoreImpl {
                io,
                path,
                tmp_prefix,
                max_store_size,
            }
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_tmp_path(&self) -> PathBuf {
        let mut name = self.tmp_prefix.clone();
        name.push(self.io.generate_uuid().hyphenated().to_string());
        self.path.with_file_name(name)
    }

    async fn remove_tmp_file(&self, tmp_path: &Path) {
        if let Err(e) = self.io.remove_file(tmp_path).await {
            error!(
                "failed to remove tmp file \"{}\": {e}",
                tmp_path.display(),
            );
        }
    }
}

#[async_trait]
impl<Io: NoteStoreIo> NoteStore for JsonNoteStoreImpl<Io> {
    async fn load(&self) -> Result<Vec<Note>, StoreError> {
        debug!("loading notes from \"{}\"", self.path.display());
        let file = match self.io.open_file(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "note file \"{}\" does not exist yet, no notes",
                    self.path.display(),
                );
                return Ok(Vec::new());
            },
            Err(e) => return Err(e.into()),
        };
        if file.size > self.max_store_size {
            return Err(StoreError::TooBig);
        }
        // one byte past the limit tells a file that grew after open
        let buf = read_limited(self.max_store_size.saturating_add(1), file.size, file.file)
            .await?;
        if buf.len() as u64 > self.max_store_size {
            return Err(StoreError::TooBig);
        }
        let notes = parse_notes(&buf)?;
        trace!("loaded {} notes", notes.len());
        Ok(notes)
    }

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        debug!(
            "saving {} notes to \"{}\"",
            notes.len(),
            self.path.display(),
        );
        let data = serde_json::to_vec_pretty(notes)
            .map_err(StoreError::Serialize)?;
        let tmp_path = self.get_tmp_path();
        trace!("writing tmp file \"{}\"", tmp_path.display());
        if let Err(e) = self.io.write_file(&tmp_path, data).await {
            error!(
                "failed to write tmp file \"{}\": {e}",
                tmp_path.display(),
            );
            self.remove_tmp_file(&tmp_path).await;
            return Err(e.into());
        }
        trace!(
            "renaming tmp file \"{}\" to \"{}\"",
            tmp_path.display(),
            self.path.display(),
        );
        if let Err(e) = self.io.rename_file(&tmp_path, &self.path).await {
            error!(
                "failed to rename tmp file \"{}\": {e}",
                tmp_path.display(),
            );
            self.remove_tmp_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

async fn read_limited<R: io::AsyncRead + Unpin + Send>(
    limit: u64,
    size_hint: u64,
    reader: R,
) -> Result<Vec<u8>, io::Error> {
    let mut buf = Vec::with_capacity(size_hint.min(limit) as usize);
    io::BufReader::new(reader).take(limit).read_to_end(&mut buf).await?;
    Ok(buf)
}

fn parse_notes(buf: &[u8]) -> Result<Vec<Note>, StoreError> {
    if buf.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let notes: Option<Vec<Note>> = serde_json::from_slice(buf)
        .map_err(StoreError::Parse)?;
    Ok(notes.unwrap_or_default())
}
