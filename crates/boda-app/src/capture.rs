//! OS 명령 기반 스크린 캡처.
//!
//! macOS는 `screencapture -x`, Windows는 `nircmd savescreenshot`,
//! 그 외 플랫폼은 설정된 명령(`capture.command`)을 사용한다.
//! 명령 문자열의 `{path}`가 출력 경로로 치환된다.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::process::Command;
use tracing::debug;

use boda_core::config::CaptureConfig;
use boda_core::error::CoreError;
use boda_core::ports::capture::ScreenCapture;

/// `ScreenCapture` 포트의 OS 명령 구현체
pub struct CommandCapture {
    config: CaptureConfig,
}

impl CommandCapture {
    pub fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    fn output_path(&self) -> PathBuf {
        let dir = self
            .config
            .output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        dir.join(format!(
            "boda-capture-{}.png",
            Utc::now().format("%Y%m%d-%H%M%S%3f")
        ))
    }

    fn build_command(&self, path: &Path) -> Result<Command, CoreError> {
        if let Some(custom) = &self.config.command {
            let rendered = custom.replace("{path}", &path.to_string_lossy());
            let mut parts = rendered.split_whitespace();
            let program = parts
                .next()
                .ok_or_else(|| CoreError::Config("캡처 명령이 비어 있습니다".to_string()))?;
            let mut command = Command::new(program);
            command.args(parts);
            return Ok(command);
        }
        platform_command(path)
    }
}

#[async_trait]
impl ScreenCapture for CommandCapture {
    async fn capture(&self) -> Result<PathBuf, CoreError> {
        // 오버레이가 화면에서 사라질 시간을 준다
        if self.config.settle_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;
        }

        let path = self.output_path();
        let mut command = self.build_command(&path)?;

        debug!(path = %path.display(), "스크린 캡처 실행");
        let status = command
            .status()
            .await
            .map_err(|e| CoreError::Capture(format!("캡처 명령 실행 실패: {e}")))?;

        if !status.success() {
            return Err(CoreError::Capture(format!(
                "캡처 명령이 실패했습니다 ({status})"
            )));
        }
        if !path.exists() {
            return Err(CoreError::Capture(
                "캡처 파일이 생성되지 않았습니다".to_string(),
            ));
        }
        Ok(path)
    }
}

#[cfg(target_os = "macos")]
fn platform_command(path: &Path) -> Result<Command, CoreError> {
    let mut command = Command::new("screencapture");
    command.arg("-x").arg(path);
    Ok(command)
}

#[cfg(target_os = "windows")]
fn platform_command(path: &Path) -> Result<Command, CoreError> {
    let mut command = Command::new("nircmd");
    command.arg("savescreenshot").arg(path);
    Ok(command)
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_command(_path: &Path) -> Result<Command, CoreError> {
    Err(CoreError::Capture(
        "이 플랫폼에는 기본 캡처 명령이 없습니다 — capture.command 설정이 필요합니다".to_string(),
    ))
}
