//! 설정 파일 관리.
//!
//! 플랫폼 설정 디렉토리(`~/.config/boda` 등)의 `config.json`을
//! 로드하고, 없으면 기본값으로 생성한다.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use directories::ProjectDirs;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::CoreError;

const CONFIG_FILE_NAME: &str = "config.json";

/// 설정 파일 로드/저장 담당.
///
/// 내부적으로 `RwLock`으로 현재 설정을 보관하며,
/// `reload`로 디스크에서 다시 읽을 수 있다.
pub struct ConfigManager {
    config_path: PathBuf,
    current: RwLock<AppConfig>,
}

impl ConfigManager {
    /// 플랫폼 기본 설정 경로에서 매니저 생성.
    ///
    /// 설정 파일이 없으면 기본값을 기록한 뒤 시작한다.
    pub fn new() -> Result<Self, CoreError> {
        let dirs = ProjectDirs::from("", "", "boda")
            .ok_or_else(|| CoreError::Config("설정 디렉토리를 결정할 수 없습니다".to_string()))?;
        let config_path = dirs.config_dir().join(CONFIG_FILE_NAME);
        Self::with_path(config_path)
    }

    /// 명시적 경로로 매니저 생성 (테스트 및 --config 플래그용)
    pub fn with_path(config_path: PathBuf) -> Result<Self, CoreError> {
        let config = Self::load_or_create(&config_path)?;
        Ok(Self {
            config_path,
            current: RwLock::new(config),
        })
    }

    fn load_or_create(path: &Path) -> Result<AppConfig, CoreError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            match serde_json::from_str::<AppConfig>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "설정 파일 로드 완료");
                    Ok(config)
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "설정 파일 파싱 실패");
                    Err(CoreError::Config(format!(
                        "설정 파일 파싱 실패 ({}): {e}",
                        path.display()
                    )))
                }
            }
        } else {
            let config = AppConfig::default_config();
            Self::write_to_disk(path, &config)?;
            info!(path = %path.display(), "기본 설정 파일 생성");
            Ok(config)
        }
    }

    fn write_to_disk(path: &Path, config: &AppConfig) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 현재 설정의 스냅샷 반환
    pub fn config(&self) -> AppConfig {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 설정을 수정하고 디스크에 저장.
    ///
    /// 독립 실행 바이너리는 설정을 읽기만 한다 — 이 진입점은
    /// 설정 UI를 가진 임베딩 호스트용이다.
    pub fn update_with<F>(&self, mutate: F) -> Result<AppConfig, CoreError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        mutate(&mut guard);
        Self::write_to_disk(&self.config_path, &guard)?;
        Ok(guard.clone())
    }

    /// 디스크에서 설정 재로드.
    ///
    /// 파일을 외부에서 고쳐 쓰는 호스트가 재시작 없이 반영할 때
    /// 호출한다.
    pub fn reload(&self) -> Result<AppConfig, CoreError> {
        let config = Self::load_or_create(&self.config_path)?;
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = config.clone();
        Ok(config)
    }

    /// 설정 파일 경로
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_default_file_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let manager = ConfigManager::with_path(path.clone()).unwrap();
        assert!(path.exists());
        assert_eq!(manager.config().backend.timeout_ms, 90_000);
    }

    #[test]
    fn update_persists_to_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let manager = ConfigManager::with_path(path.clone()).unwrap();

        manager
            .update_with(|c| c.backend.timeout_ms = 5_000)
            .unwrap();

        let reloaded = ConfigManager::with_path(path).unwrap();
        assert_eq!(reloaded.config().backend.timeout_ms, 5_000);
    }

    #[test]
    fn reload_picks_up_external_edit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let manager = ConfigManager::with_path(path.clone()).unwrap();

        let mut config = manager.config();
        config.backend.command = "python3".to_string();
        let json = serde_json::to_string_pretty(&config).unwrap();
        fs::write(&path, json).unwrap();

        let reloaded = manager.reload().unwrap();
        assert_eq!(reloaded.backend.command, "python3");
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(ConfigManager::with_path(path).is_err());
    }
}
