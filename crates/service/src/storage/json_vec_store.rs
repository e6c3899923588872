use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Generic JSON file-backed collection store.
///
/// Persists a `Vec<T>` as a pretty-printed JSON array. The file is the source of
/// truth: every operation loads it, and the path lives behind the lock, so the
/// guard's scope is the critical section.
/// - Reads share the lock and observe either the whole file before a mutation or
///   the whole file after it.
/// - Mutations hold it exclusively across load, edit and persist.
/// - Persisting writes a sibling temp file, renames it over the target, then
///   syncs the parent directory so the rename itself survives a crash.
pub struct JsonVecStore<T> {
    file: Arc<RwLock<PathBuf>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonVecStore<T> {
    fn clone(&self) -> Self {
        Self { file: Arc::clone(&self.file), _marker: PhantomData }
    }
}

impl<T> JsonVecStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// Initialize the store from a path. Creates the file with an empty array if missing.
    /// An existing file that does not parse is left as is.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| io_error("create dir", parent, e))?;
            }
        }

        match fs::metadata(&file_path).await {
            Ok(_) => match read_collection::<T>(&file_path).await {
                Ok(items) => debug!(path = %file_path.display(), count = items.len(), "loaded collection"),
                Err(e) => warn!(path = %file_path.display(), error = %e, "existing data file is unusable; reads will be empty"),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                write_collection::<T>(&file_path, &[]).await?;
                debug!(path = %file_path.display(), "created empty data file");
            }
            Err(e) => return Err(io_error("stat", &file_path, e)),
        }

        Ok(Arc::new(Self { file: Arc::new(RwLock::new(file_path)), _marker: PhantomData }))
    }

    pub async fn path(&self) -> PathBuf {
        self.file.read().await.clone()
    }

    /// Current collection; read or parse failures are logged and yield an empty vector.
    pub async fn snapshot(&self) -> Vec<T> {
        let path = self.file.read().await;
        match read_collection(&path).await {
            Ok(items) => items,
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load collection; serving empty");
                Vec::new()
            }
        }
    }

    /// Current collection, surfacing storage faults.
    pub async fn try_snapshot(&self) -> Result<Vec<T>, ServiceError> {
        let path = self.file.read().await;
        read_collection(&path).await
    }

    /// Load, apply `f`, persist, all under the exclusive lock.
    ///
    /// Nothing is written when `f` fails. When the load fails the mutation is
    /// aborted so a bad file is never overwritten with a partial view. When the
    /// persist fails the previous file stays in place and the edited vector is
    /// dropped.
    pub async fn mutate<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let path = self.file.write().await;
        let mut items = read_collection(&path).await?;
        let out = f(&mut items)?;
        write_collection(&path, &items).await?;
        Ok(out)
    }
}

fn io_error(op: &str, path: &Path, e: std::io::Error) -> ServiceError {
    ServiceError::Persistence(format!("{op} {}: {e}", path.display()))
}

async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ServiceError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error("read", path, e)),
    };
    // a freshly touched file counts as empty
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(&bytes)
        .map_err(|e| ServiceError::MalformedState(format!("{}: {e}", path.display())))
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4()))
}

async fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(items)
        .map_err(|e| ServiceError::Persistence(format!("encode {}: {e}", path.display())))?;
    let tmp = temp_sibling(path);

    let written = async {
        let mut f = fs::File::create(&tmp).await?;
        f.write_all(&data).await?;
        f.sync_all().await?;
        drop(f);
        fs::rename(&tmp, path).await
    }
    .await;

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp).await;
        return Err(io_error("write", path, e));
    }
    // the new content is already visible to readers; a failed directory sync
    // only weakens durability, so it is logged rather than reported
    if let Err(e) = sync_parent_dir(path).await {
        warn!(path = %path.display(), error = %e, "data directory sync failed after rename");
    }
    Ok(())
}

/// Flush the directory entry of `path` to disk. A bare file name means the
/// current directory.
#[cfg(unix)]
async fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::File::open(dir).await?.sync_all().await
}

// directories cannot be opened as files here
#[cfg(not(unix))]
async fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
