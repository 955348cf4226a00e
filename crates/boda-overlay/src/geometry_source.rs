//! 지오메트리 스냅샷 공급원.
//!
//! 프로브가 일시적으로 실패해도 매핑이 멈추지 않도록
//! 마지막 정상 스냅샷을 캐시한다. 프로브와 캐시가 모두 없을
//! 때에만 `MappingDegraded`를 반환한다.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use boda_core::error::CoreError;
use boda_core::models::geometry::GeometrySnapshot;
use boda_core::ports::geometry::GeometryProbe;

/// 캐시가 달린 지오메트리 공급원
pub struct GeometrySource {
    probe: Arc<dyn GeometryProbe>,
    cache: RwLock<Option<GeometrySnapshot>>,
}

impl GeometrySource {
    /// 프로브를 감싸는 공급원 생성
    pub fn new(probe: Arc<dyn GeometryProbe>) -> Self {
        Self {
            probe,
            cache: RwLock::new(None),
        }
    }

    /// 프로브를 강제 실행하고 캐시를 갱신한다.
    ///
    /// 오버레이 호스트가 창 리사이즈 이벤트에서 호출하는 진입점.
    /// 정적 지오메트리로 도는 독립 실행 바이너리에는 호출자가 없다.
    pub async fn refresh(&self) -> Result<GeometrySnapshot, CoreError> {
        let snapshot = self.probe.probe().await?;
        self.store(snapshot);
        debug!(?snapshot, "지오메트리 갱신");
        Ok(snapshot)
    }

    /// 현재 스냅샷을 반환한다.
    ///
    /// 프로브 성공 시 캐시를 갱신하며, 실패 시 마지막 정상값으로
    /// 폴백한다 (경고 로그). 폴백할 값도 없으면 `MappingDegraded`.
    pub async fn snapshot(&self) -> Result<GeometrySnapshot, CoreError> {
        match self.probe.probe().await {
            Ok(snapshot) => {
                self.store(snapshot);
                Ok(snapshot)
            }
            Err(e) => {
                warn!(error = %e, "지오메트리 프로브 실패 — 캐시로 폴백");
                self.cached().ok_or_else(|| {
                    CoreError::MappingDegraded(format!("지오메트리 확인 불가: {e}"))
                })
            }
        }
    }

    /// 캐시된 마지막 정상 스냅샷
    pub fn cached(&self) -> Option<GeometrySnapshot> {
        match self.cache.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn store(&self, snapshot: GeometrySnapshot) {
        let mut guard = match self.cache.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(snapshot);
    }
}
