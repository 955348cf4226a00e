//! 콘솔 렌더러와 정적 지오메트리 프로브.
//!
//! 실제 오버레이 창은 외부 협력자다. 독립 실행 시에는 단계와
//! 알림을 터미널 로그로 대신 보여주고, 지오메트리는 설정된
//! 디스플레이 값으로 고정한다. 오버레이 호스트가 있으면 그쪽의
//! 렌더러/프로브 구현으로 교체된다.

use async_trait::async_trait;
use tracing::{error, info};

use boda_core::config::DisplayConfig;
use boda_core::error::CoreError;
use boda_core::models::geometry::{GeometrySnapshot, Size};
use boda_core::ports::geometry::GeometryProbe;
use boda_core::ports::renderer::{OverlayRenderer, StepPresentation};

/// 단계를 터미널 로그로 보여주는 렌더러
pub struct ConsoleRenderer;

#[async_trait]
impl OverlayRenderer for ConsoleRenderer {
    async fn present_step(&self, presentation: &StepPresentation) -> Result<(), CoreError> {
        info!(action = %presentation.action, "다음 단계 — ok/fail/abort로 판정하세요");
        if let Some(direction) = presentation.scroll {
            info!(?direction, "스크롤 방향");
        }
        for annotation in &presentation.annotations {
            info!(
                x = annotation.region.rect.x,
                y = annotation.region.rect.y,
                width = annotation.region.rect.width,
                height = annotation.region.rect.height,
                anchor_x = annotation.region.anchor_x,
                anchor_y = annotation.region.anchor_y,
                "대상 영역"
            );
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), CoreError> {
        info!("하이라이트 제거");
        Ok(())
    }

    async fn notify_completed(&self, message: &str) -> Result<(), CoreError> {
        info!(message = %message, "목표 완료");
        Ok(())
    }

    async fn notify_error(&self, message: &str) -> Result<(), CoreError> {
        error!(message = %message, "사이클 실패");
        Ok(())
    }
}

/// 설정값으로 고정된 지오메트리 프로브.
///
/// 창 영역은 미확인(None)으로 두어 매퍼가 모니터 전체 폴백을
/// 사용하게 한다.
pub struct StaticGeometryProbe {
    snapshot: GeometrySnapshot,
}

impl StaticGeometryProbe {
    pub fn from_display(config: &DisplayConfig) -> Self {
        let screen = Size::new(config.screen_width, config.screen_height);
        Self {
            snapshot: GeometrySnapshot {
                screen_size: screen,
                window_bounds: None,
                viewport_size: screen,
                device_pixel_ratio: config.device_pixel_ratio,
            },
        }
    }
}

#[async_trait]
impl GeometryProbe for StaticGeometryProbe {
    async fn probe(&self) -> Result<GeometrySnapshot, CoreError> {
        Ok(self.snapshot)
    }
}
