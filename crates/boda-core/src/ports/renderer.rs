//! 오버레이 렌더러 포트.
//!
//! 도형/폰트/애니메이션 등 실제 그리기는 이 계약 밖이다.
//! 코어는 매핑이 끝난 `Annotation`과 알림 텍스트만 넘긴다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::geometry::MappedRegion;
use crate::models::task::ScrollDirection;

/// 한 단계의 오버레이 주석 — 매핑된 영역 + 라벨
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// 뷰포트 픽셀 영역 + 말풍선 앵커
    pub region: MappedRegion,
    /// 말풍선에 표시할 텍스트
    pub label: String,
}

/// 렌더러에 전달되는 단계 표시 내용
#[derive(Debug, Clone, PartialEq)]
pub struct StepPresentation {
    /// 액션 설명 텍스트
    pub action: String,
    /// 매핑된 주석들. 지오메트리 성능 저하 시 비어있을 수 있다
    pub annotations: Vec<Annotation>,
    /// 스크롤 액션이면 방향 (영역 없음)
    pub scroll: Option<ScrollDirection>,
}

/// 오버레이 렌더러 — 외부 협력자.
#[async_trait]
pub trait OverlayRenderer: Send + Sync {
    /// 단계 하나를 표시한다 (Deciding 진입 시)
    async fn present_step(&self, presentation: &StepPresentation) -> Result<(), CoreError>;

    /// 하이라이트/주석 제거 (이력 리셋 또는 명시적 클리어)
    async fn clear(&self) -> Result<(), CoreError>;

    /// 목표 완료 알림
    async fn notify_completed(&self, message: &str) -> Result<(), CoreError>;

    /// 사이클 실패 알림 — 조작자는 항상 단계 또는 명시적 실패를 본다
    async fn notify_error(&self, message: &str) -> Result<(), CoreError>;
}
