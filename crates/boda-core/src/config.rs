//! 애플리케이션 설정 구조체.
//!
//! 백엔드 프로세스 실행, 캡처 명령, 디스플레이 기본값 등
//! 런타임 설정을 정의한다. JSON 파일에서 로드 (`config_manager`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 백엔드 분석 프로세스 설정
    pub backend: BackendConfig,
    /// 스크린 캡처 설정
    #[serde(default)]
    pub capture: CaptureConfig,
    /// 디스플레이 기본값 (정적 프로브용)
    #[serde(default)]
    pub display: DisplayConfig,
}

/// 백엔드 분석 프로세스 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// 실행 명령 (기본: python)
    #[serde(default = "default_backend_command")]
    pub command: String,
    /// 명령 인자 (기본: ["main.py"])
    #[serde(default = "default_backend_args")]
    pub args: Vec<String>,
    /// 작업 디렉토리 (None이면 현재 디렉토리)
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    /// analyze 응답 타임아웃 (밀리초)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl BackendConfig {
    /// 타임아웃을 Duration으로 반환
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            command: default_backend_command(),
            args: default_backend_args(),
            working_dir: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// 스크린 캡처 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// 캡처 명령 오버라이드. None이면 플랫폼 기본 명령 사용
    #[serde(default)]
    pub command: Option<String>,
    /// 캡처 파일 저장 디렉토리 (None이면 OS 임시 디렉토리)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// 캡처 전 오버레이가 가려지길 기다리는 시간 (밀리초)
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            command: None,
            output_dir: None,
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

/// 디스플레이 기본값 — 호스트 프로브가 없을 때의 정적 지오메트리
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// 주 모니터 가로 (물리 픽셀)
    #[serde(default = "default_screen_width")]
    pub screen_width: f64,
    /// 주 모니터 세로 (물리 픽셀)
    #[serde(default = "default_screen_height")]
    pub screen_height: f64,
    /// 디바이스 픽셀 비율
    #[serde(default = "default_dpr")]
    pub device_pixel_ratio: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            device_pixel_ratio: default_dpr(),
        }
    }
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            backend: BackendConfig::default(),
            capture: CaptureConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

fn default_backend_command() -> String {
    "python".to_string()
}

fn default_backend_args() -> Vec<String> {
    vec!["main.py".to_string()]
}

fn default_timeout_ms() -> u64 {
    90_000
}

fn default_settle_delay_ms() -> u64 {
    300
}

fn default_screen_width() -> f64 {
    1920.0
}

fn default_screen_height() -> f64 {
    1080.0
}

fn default_dpr() -> f64 {
    1.0
}
