//! 지오메트리 프로브 포트.
//!
//! 오버레이 호스트(창 시스템)가 모니터/창/뷰포트 정보를 공급한다.
//! 구현: `boda-app`의 정적 프로브 (실 호스트는 자체 프로브 제공).

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::geometry::GeometrySnapshot;

/// 디스플레이 지오메트리 조회.
#[async_trait]
pub trait GeometryProbe: Send + Sync {
    /// 현재 지오메트리 스냅샷을 읽는다.
    ///
    /// 실패해도 워크플로우는 죽지 않는다 — `GeometrySource`가
    /// 마지막 정상값으로 폴백한다.
    async fn probe(&self) -> Result<GeometrySnapshot, CoreError>;
}
