//! 분석기 포트.
//!
//! 구현: `boda-backend`의 BackendChannel (장수명 자식 프로세스).
//! 분석 프로세스 내부는 불투명한 오라클로 취급한다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::protocol::{AnalyzeRequest, AnalyzeResponse};

/// 스크린샷 + 목표 + 이력 → 다음 단계 또는 완료.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// 단일 analyze 호출.
    ///
    /// 실패 모드: 프로세스 다운 `ChannelDown`, 제한 시간 초과
    /// `ChannelTimeout`, 진행 중 요청 존재 `ChannelBusy`,
    /// 형태 불일치 응답 `Protocol`.
    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse, CoreError>;
}
