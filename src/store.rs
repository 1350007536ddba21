//! テイスティング記録のファイルストア
//!
//! ブラウザの localStorage と同じく「キー → 文字列」を1つのJSONファイルに保持する。
//! 書き込みのたびにファイル全体を書き直す。

use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use top100_common::selection::KeyValueStore;
use top100_common::{Error, Result};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイル全体を読み込み（無い・壊れている場合は空）
    fn load_map(&self) -> Map<String, Value> {
        if !self.path.exists() {
            return Map::new();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "記録ファイルを開けません");
                return Map::new();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "記録ファイルが壊れているため空として扱います");
                Map::new()
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        match self.load_map().remove(key)? {
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load_map();
        map.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &Value::Object(map))?;
        debug!(path = %self.path.display(), key, "記録を保存");
        Ok(())
    }
}
