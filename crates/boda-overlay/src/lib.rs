//! 오버레이 좌표 어댑터.
//!
//! 정규화 모니터 좌표를 뷰포트 픽셀로 바꾸는 순수 매퍼와,
//! 지오메트리 스냅샷을 캐시하는 공급원.

pub mod geometry_source;
pub mod mapper;

pub use geometry_source::GeometrySource;
