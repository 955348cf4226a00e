//! 디스플레이 지오메트리 모델.
//!
//! 분석기가 반환하는 정규화 사각형(모니터 비율 좌표)과
//! 오버레이 뷰포트 픽셀 좌표 사이의 변환에 쓰이는 타입들.

use serde::{Deserialize, Serialize};

/// 2차원 크기 (물리 픽셀)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// 새 크기 생성
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// 화면상 영역 (원점 + 크기, 물리 픽셀)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// 새 영역 생성
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 모니터 전체를 덮는 영역
    pub fn full_screen(screen: Size) -> Self {
        Self::new(0.0, 0.0, screen.width, screen.height)
    }
}

/// 정규화 사각형 — 각 성분이 [0,1] 범위의 *물리 모니터* 비율.
///
/// 애플리케이션 창 기준 비율이 아니다. 이 불변식을 창 기준으로
/// 혼동하면 멀티모니터/창 오프셋 환경에서 어긋난 좌표가 나온다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    /// 새 정규화 사각형 생성
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 모든 성분이 [0,1] 범위인지
    pub fn is_in_range(&self) -> bool {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        in_unit(self.x) && in_unit(self.y) && in_unit(self.width) && in_unit(self.height)
    }
}

/// 지오메트리 스냅샷 — 한 번의 매핑 호출 동안 불변으로 취급.
///
/// 리사이즈 시와 요청 시점에 갱신된다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    /// 주 모니터 크기 (물리 픽셀)
    pub screen_size: Size,
    /// 오버레이 창의 화면상 영역. 미확인이면 None
    pub window_bounds: Option<Bounds>,
    /// 오버레이 뷰포트 크기 (논리 픽셀)
    pub viewport_size: Size,
    /// 디바이스 픽셀 비율 (렌더러의 백킹 버퍼 스케일)
    pub device_pixel_ratio: f64,
}

impl GeometrySnapshot {
    /// 창 영역 반환. 미확인이면 모니터 전체를 덮는다고 가정한다.
    ///
    /// 이 폴백은 단일 모니터의 주 디스플레이에서만 정확하다.
    /// 멀티모니터 구성에서는 검증되지 않은 가정이다.
    pub fn effective_window_bounds(&self) -> Bounds {
        match self.window_bounds {
            Some(bounds) => bounds,
            None => {
                tracing::debug!("창 영역 미확인 — 모니터 전체 가정으로 폴백");
                Bounds::full_screen(self.screen_size)
            }
        }
    }
}

/// 뷰포트 좌표계의 픽셀 사각형 (뷰포트 범위로 클램핑됨)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// 매핑 결과 — 픽셀 사각형 + 말풍선 앵커.
///
/// 앵커는 사각형의 상단 중앙 `(x + width/2, y)`이며,
/// 렌더링 시점에 재계산하지 않고 매퍼 출력에 포함된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedRegion {
    /// 뷰포트 픽셀 사각형
    pub rect: PixelRect,
    /// 말풍선 앵커 X (상단 중앙)
    pub anchor_x: i32,
    /// 말풍선 앵커 Y (상단)
    pub anchor_y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_rect_range_check() {
        assert!(NormalizedRect::new(0.5, 0.8, 0.1, 0.05).is_in_range());
        assert!(NormalizedRect::new(0.0, 0.0, 1.0, 1.0).is_in_range());
        assert!(!NormalizedRect::new(-0.1, 0.0, 0.5, 0.5).is_in_range());
        assert!(!NormalizedRect::new(0.0, 0.0, 1.2, 0.5).is_in_range());
    }

    #[test]
    fn effective_window_bounds_fallback() {
        let snapshot = GeometrySnapshot {
            screen_size: Size::new(1920.0, 1080.0),
            window_bounds: None,
            viewport_size: Size::new(1920.0, 1080.0),
            device_pixel_ratio: 1.0,
        };

        let bounds = snapshot.effective_window_bounds();
        assert_eq!(bounds, Bounds::new(0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn effective_window_bounds_known() {
        let snapshot = GeometrySnapshot {
            screen_size: Size::new(1920.0, 1080.0),
            window_bounds: Some(Bounds::new(100.0, 50.0, 800.0, 600.0)),
            viewport_size: Size::new(800.0, 600.0),
            device_pixel_ratio: 2.0,
        };

        let bounds = snapshot.effective_window_bounds();
        assert_eq!(bounds, Bounds::new(100.0, 50.0, 800.0, 600.0));
    }
}
