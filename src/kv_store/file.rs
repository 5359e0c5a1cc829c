use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use log::{debug, error, trace};
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncReadExt;

use crate::config::app_config::AppConfig;
use crate::kv_store::{KeyValueStore, KvStoreError};
use crate::lib_constants::{KV_DIRECTORY_PATH, MAX_PLAIN_KEY_LEN, TMP_FILENAME_INFIX};
use crate::rng::make_uuid;

/// One file per key under `<data_directory>/kv`.
///
/// File names are the hex-encoded keys. Keys longer than
/// `MAX_PLAIN_KEY_LEN` bytes keep a hex prefix and get a SHA-256 digest
/// appended, so names stay within filesystem limits for any key. Values are
/// written to a temporary sibling first and renamed into place.
#[derive(Debug)]
pub struct FileKeyValueStore {
    basedir: PathBuf,
    max_value_size: u64,
}

impl FileKeyValueStore {
    pub async fn new(
        app_config: &AppConfig,
    ) -> Result<FileKeyValueStore, KvStoreError> {
        Self::new_internal(
            Self::get_kv_dir(app_config),
            app_config.max_value_size,
        ).await
    }

    pub fn get_kv_dir(app_config: &AppConfig) -> PathBuf {
        app_config.data_directory.join(KV_DIRECTORY_PATH)
    }

    async fn new_internal(
        kv_dir: PathBuf,
        max_value_size: u64,
    ) -> Result<FileKeyValueStore, KvStoreError> {
        debug!("opening key-value store at \"{}\"", kv_dir.display());
        fs::create_dir_all(&kv_dir).await?;
        if !fs::metadata(&kv_dir).await?.is_dir() {
            return Err(KvStoreError::DataDirNotInitialized);
        }
        Ok(FileKeyValueStore {
            basedir: kv_dir,
            max_value_size,
        })
    }

    fn get_value_path(&self, key: &str) -> PathBuf {
        self.basedir.join(get_value_filename(key))
    }

    fn get_value_tmp_path(&self, key: &str) -> PathBuf {
        self.basedir
            .join(
                get_value_filename(key) +
                    TMP_FILENAME_INFIX +
                    &make_uuid(&mut rand::rng()).hyphenated().to_string()
            )
    }
}

// hex never contains '-', so the two forms cannot collide
fn get_value_filename(key: &str) -> String {
    let bytes = key.as_bytes();
    if bytes.len() <= MAX_PLAIN_KEY_LEN {
        return hex::encode(bytes);
    }
    format!(
        "{}-{}",
        hex::encode(&bytes[..MAX_PLAIN_KEY_LEN]),
        hex::encode(Sha256::digest(bytes)),
    )
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvStoreError> {
        let path = self.get_value_path(key);
        trace!("reading key \"{key}\" from \"{}\"", path.display());
        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let size = file.metadata().await?.len();
        if size > self.max_value_size {
            return Err(KvStoreError::TooBig);
        }
        let mut buf = Vec::with_capacity(size as usize);
        // the file may have grown since the metadata read
        file.take(self.max_value_size + 1).read_to_end(&mut buf).await?;
        if buf.len() as u64 > self.max_value_size {
            return Err(KvStoreError::TooBig);
        }
        Ok(Some(String::from_utf8(buf)?))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KvStoreError> {
        if value.len() as u64 > self.max_value_size {
            return Err(KvStoreError::TooBig);
        }
        let path = self.get_value_path(key);
        let tmp_path = self.get_value_tmp_path(key);
        trace!(
            "writing key \"{key}\" to \"{}\" via \"{}\"",
            path.display(),
            tmp_path.display(),
        );
        if let Err(e) = fs::write(&tmp_path, value).await {
            error!(
                "failed to write tmp file \"{}\" for key \"{key}\": {e}",
                tmp_path.display(),
            );
            remove_tmp_file(&tmp_path).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            error!(
                "failed to rename tmp file \"{}\" for key \"{key}\": {e}",
                tmp_path.display(),
            );
            remove_tmp_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KvStoreError> {
        let path = self.get_value_path(key);
        trace!("removing key \"{key}\" at \"{}\"", path.display());
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn remove_tmp_file(tmp_path: &Path) {
    match fs::remove_file(tmp_path).await {
        Ok(()) => (),
        Err(e) if e.kind() == ErrorKind::NotFound => (),
        Err(e) => error!(
            "failed to remove tmp file \"{}\": {e}",
            tmp_path.display(),
        ),
    }
}
