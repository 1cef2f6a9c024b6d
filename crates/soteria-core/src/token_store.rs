//! 인증 토큰 저장소 구현.
//!
//! 설정 디렉토리의 `auth.json`에 토큰과 저장 시각을 기록한다.

use crate::config_manager::ConfigManager;
use crate::error::CoreError;
use crate::ports::token_store::TokenStore;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 토큰 파일 이름
const TOKEN_FILE_NAME: &str = "auth.json";

/// 디스크에 기록되는 토큰 레코드
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    saved_at: DateTime<Utc>,
}

/// 파일 기반 토큰 저장소
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// 지정된 경로의 토큰 저장소
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 플랫폼 설정 디렉토리의 토큰 저장소
    pub fn in_config_dir() -> Result<Self, CoreError> {
        Ok(Self::new(ConfigManager::config_dir()?.join(TOKEN_FILE_NAME)))
    }

    /// 토큰 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredToken>(&content) {
            Ok(stored) if !stored.token.is_empty() => {
                debug!("저장된 토큰 로드 (저장 시각: {})", stored.saved_at);
                Some(stored.token)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("토큰 파일 파싱 실패, 무시: {e}");
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let stored = StoredToken {
            token: token.to_string(),
            saved_at: Utc::now(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        debug!("토큰 저장: {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("토큰 파일 삭제: {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// 메모리 토큰 저장소: 프로세스 종료 시 사라짐
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 토큰이 있는 저장소
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn save(&self, token: &str) -> Result<(), CoreError> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self.token.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_roundtrip_and_clear() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(dir.path().join("sub").join("auth.json"));

        assert!(store.load().is_none());
        store.save("tok_123").unwrap();
        assert_eq!(store.load().as_deref(), Some("tok_123"));

        store.clear().unwrap();
        assert!(store.load().is_none());
        // 이미 없는 파일 삭제는 no-op
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_token_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auth.json");
        fs::write(&path, "garbage").unwrap();

        let store = FileTokenStore::new(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn memory_store() {
        let store = MemoryTokenStore::with_token("abc");
        assert_eq!(store.load().as_deref(), Some("abc"));
        store.clear().unwrap();
        assert!(store.load().is_none());
    }
}
