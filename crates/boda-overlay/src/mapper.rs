//! 좌표 매핑 파이프라인.
//!
//! 분석기의 정규화 사각형(물리 모니터 비율)을 오버레이 뷰포트
//! 픽셀 좌표로 변환한다. 단계:
//!
//! 1. 모니터 비율 → 모니터 픽셀
//! 2. 창 원점 차감 (창 기준 좌표로)
//! 3. 뷰포트/창 비율로 스케일
//! 4. 반올림
//! 5. 뷰포트 범위로 클램핑
//! 6. 상단 중앙 앵커 계산 `(x + width/2, y)`
//!
//! 순수 함수 — 지오메트리 스냅샷은 호출 동안 불변으로 취급한다.

use boda_core::models::geometry::{
    Bounds, GeometrySnapshot, MappedRegion, NormalizedRect, PixelRect,
};
use boda_core::models::task::Task;
use boda_core::ports::renderer::Annotation;

/// 정규화 사각형 하나를 뷰포트 픽셀 영역으로 변환한다.
///
/// 모든 입력에 대해 전체 함수다 — 범위 밖 입력도 클램핑 단계가
/// 뷰포트 안으로 끌어들인다.
pub fn map_region(rect: &NormalizedRect, snapshot: &GeometrySnapshot) -> MappedRegion {
    let screen = snapshot.screen_size;
    let window = sanitize_window(snapshot.effective_window_bounds(), screen);
    let viewport = snapshot.viewport_size;

    // 1. 모니터 비율 → 모니터 픽셀
    let monitor_x = rect.x * screen.width;
    let monitor_y = rect.y * screen.height;
    let monitor_w = rect.width * screen.width;
    let monitor_h = rect.height * screen.height;

    // 2. 창 원점 차감 + 3. 뷰포트 스케일
    let scale_x = viewport.width / window.width;
    let scale_y = viewport.height / window.height;
    let view_x = (monitor_x - window.x) * scale_x;
    let view_y = (monitor_y - window.y) * scale_y;
    let view_w = monitor_w * scale_x;
    let view_h = monitor_h * scale_y;

    // 4. 반올림 + 5. 클램핑
    let max_x = viewport.width.round() as i32;
    let max_y = viewport.height.round() as i32;
    let (x, width) = clamp_axis(view_x.round() as i32, view_w.round() as i32, max_x);
    let (y, height) = clamp_axis(view_y.round() as i32, view_h.round() as i32, max_y);

    // 6. 말풍선 앵커 — 상단 중앙
    MappedRegion {
        rect: PixelRect {
            x,
            y,
            width,
            height,
        },
        anchor_x: x + width / 2,
        anchor_y: y,
    }
}

/// 단계의 모든 영역을 주석으로 매핑한다
pub fn map_task(task: &Task, snapshot: &GeometrySnapshot) -> Vec<Annotation> {
    task.regions
        .iter()
        .map(|rect| Annotation {
            region: map_region(rect, snapshot),
            label: task.action.clone(),
        })
        .collect()
}

/// 퇴화한 창 영역(너비/높이 0 이하)은 모니터 전체로 대체
fn sanitize_window(window: Bounds, screen: boda_core::models::geometry::Size) -> Bounds {
    if window.width <= 0.0 || window.height <= 0.0 {
        Bounds::full_screen(screen)
    } else {
        window
    }
}

fn clamp_axis(pos: i32, len: i32, max: i32) -> (i32, i32) {
    let pos = pos.clamp(0, max);
    let len = len.max(0).min(max - pos);
    (pos, len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boda_core::models::geometry::Size;

    fn identity_snapshot() -> GeometrySnapshot {
        GeometrySnapshot {
            screen_size: Size::new(1920.0, 1080.0),
            window_bounds: Some(Bounds::new(0.0, 0.0, 1920.0, 1080.0)),
            viewport_size: Size::new(1920.0, 1080.0),
            device_pixel_ratio: 1.0,
        }
    }

    #[test]
    fn identity_geometry_maps_fractions_to_monitor_pixels() {
        let rect = NormalizedRect::new(0.5, 0.8, 0.1, 0.05);
        let mapped = map_region(&rect, &identity_snapshot());

        assert_eq!(
            mapped.rect,
            PixelRect {
                x: 960,
                y: 864,
                width: 192,
                height: 54
            }
        );
        assert_eq!(mapped.anchor_x, 1056);
        assert_eq!(mapped.anchor_y, 864);
    }

    #[test]
    fn right_edge_overflow_is_clamped() {
        let rect = NormalizedRect::new(0.95, 0.5, 0.2, 0.1);
        let mapped = map_region(&rect, &identity_snapshot());

        assert_eq!(mapped.rect.x, 1824);
        assert_eq!(mapped.rect.width, 96);
        assert!(mapped.rect.x + mapped.rect.width <= 1920);
    }

    #[test]
    fn window_origin_is_subtracted() {
        let snapshot = GeometrySnapshot {
            screen_size: Size::new(1920.0, 1080.0),
            window_bounds: Some(Bounds::new(100.0, 50.0, 800.0, 600.0)),
            viewport_size: Size::new(800.0, 600.0),
            device_pixel_ratio: 1.0,
        };

        let rect = NormalizedRect::new(0.1, 0.1, 0.05, 0.05);
        let mapped = map_region(&rect, &snapshot);

        // 모니터 (192,108) - 창 원점 (100,50) = (92,58)
        assert_eq!(
            mapped.rect,
            PixelRect {
                x: 92,
                y: 58,
                width: 96,
                height: 54
            }
        );
    }

    #[test]
    fn viewport_scale_is_applied() {
        let snapshot = GeometrySnapshot {
            screen_size: Size::new(1920.0, 1080.0),
            window_bounds: Some(Bounds::new(0.0, 0.0, 960.0, 540.0)),
            viewport_size: Size::new(1920.0, 1080.0),
            device_pixel_ratio: 2.0,
        };

        let rect = NormalizedRect::new(0.25, 0.25, 0.1, 0.1);
        let mapped = map_region(&rect, &snapshot);

        assert_eq!(
            mapped.rect,
            PixelRect {
                x: 960,
                y: 540,
                width: 384,
                height: 216
            }
        );
    }

    #[test]
    fn missing_window_bounds_falls_back_to_full_monitor() {
        let snapshot = GeometrySnapshot {
            window_bounds: None,
            ..identity_snapshot()
        };

        let rect = NormalizedRect::new(0.5, 0.8, 0.1, 0.05);
        let mapped = map_region(&rect, &snapshot);
        assert_eq!(mapped.rect.x, 960);
        assert_eq!(mapped.rect.y, 864);
    }

    #[test]
    fn round_trip_within_one_pixel() {
        let snapshot = GeometrySnapshot {
            screen_size: Size::new(2560.0, 1440.0),
            window_bounds: Some(Bounds::new(320.0, 180.0, 1920.0, 1080.0)),
            viewport_size: Size::new(1280.0, 720.0),
            device_pixel_ratio: 1.5,
        };
        let window = snapshot.window_bounds.unwrap();
        let scale_x = snapshot.viewport_size.width / window.width;
        let scale_y = snapshot.viewport_size.height / window.height;

        for rect in [
            NormalizedRect::new(0.3, 0.4, 0.12, 0.08),
            NormalizedRect::new(0.45, 0.25, 0.2, 0.3),
            NormalizedRect::new(0.6, 0.5, 0.01, 0.01),
        ] {
            let mapped = map_region(&rect, &snapshot);

            // 역변환해서 원래 모니터 픽셀과 비교
            let back_x = f64::from(mapped.rect.x) / scale_x + window.x;
            let back_y = f64::from(mapped.rect.y) / scale_y + window.y;
            let expected_x = rect.x * snapshot.screen_size.width;
            let expected_y = rect.y * snapshot.screen_size.height;

            assert!((back_x - expected_x).abs() <= 1.0, "x 오차 초과: {rect:?}");
            assert!((back_y - expected_y).abs() <= 1.0, "y 오차 초과: {rect:?}");
        }
    }

    #[test]
    fn map_task_labels_every_region() {
        let task = Task {
            step: 3,
            action: "검색창에 입력".to_string(),
            regions: vec![
                NormalizedRect::new(0.1, 0.1, 0.1, 0.1),
                NormalizedRect::new(0.5, 0.5, 0.1, 0.1),
            ],
        };

        let annotations = map_task(&task, &identity_snapshot());
        assert_eq!(annotations.len(), 2);
        assert!(annotations.iter().all(|a| a.label == "검색창에 입력"));
    }
}
