//! 단계 이력.
//!
//! 판정 순서대로만 늘어나는 append-only 로그. 세션 시작과
//! 완료 시에 비워지며, analyze 요청마다 통째로 전달된다.

use tracing::info;

use boda_core::models::task::StepOutcome;

/// 판정이 끝난 단계들의 순서 있는 로그
#[derive(Debug, Default, Clone)]
pub struct StepHistory {
    entries: Vec<StepOutcome>,
}

impl StepHistory {
    /// 빈 이력 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 판정 결과 기록. 호출 순서가 곧 이력 순서다.
    pub fn record(&mut self, outcome: StepOutcome) {
        info!(
            step = outcome.step,
            status = ?outcome.status,
            "단계 판정 기록"
        );
        self.entries.push(outcome);
    }

    /// 기록된 순서 그대로의 항목들
    pub fn entries(&self) -> &[StepOutcome] {
        &self.entries
    }

    /// 기록 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 비어있는지
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 모든 기록 삭제 (새 세션 또는 완료 시)
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// analyze 요청에 실을 복사본
    pub fn to_wire(&self) -> Vec<StepOutcome> {
        self.entries.clone()
    }
}
