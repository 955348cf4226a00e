//! 스크린 캡처 포트.
//!
//! 구현: `boda-app`의 OS 명령 어댑터 (screencapture/nircmd).

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::CoreError;

/// 스크린 캡처 — Capturing 상태 진입마다 한 번 호출된다.
#[async_trait]
pub trait ScreenCapture: Send + Sync {
    /// 전체 화면을 캡처하고 이미지 파일 경로를 반환한다.
    ///
    /// OS 명령 부재, 파일 미생성 시 `CoreError::Capture`.
    async fn capture(&self) -> Result<PathBuf, CoreError>;
}
