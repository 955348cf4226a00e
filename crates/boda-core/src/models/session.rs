//! 워크플로우 상태.
//!
//! 진행 여부를 흩어진 불리언 플래그가 아닌 명시적 상태 머신
//! 열거형으로 표현한다. 모든 전이는 (상태, 이벤트)의 전함수다.

use serde::{Deserialize, Serialize};

/// 워크플로우 상태.
///
/// `Idle → Capturing → Awaiting → Deciding → Capturing …` 순환에
/// 흡수 상태 `Completed`/`Aborted`가 붙는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowState {
    /// 목표 대기 중
    Idle,
    /// 외부 캡처 협력자 호출 중
    Capturing,
    /// 백엔드 analyze() 응답 대기 중
    Awaiting,
    /// 조작자 판정 대기 중 (타임아웃 없음)
    Deciding,
    /// 목표 완료 (흡수 상태 — 새 목표 제출로만 이탈)
    Completed,
    /// 조작자 중단 (흡수 상태 — 새 목표 제출로만 이탈)
    Aborted,
}

impl WorkflowState {
    /// 사이클이 진행 중인지. Capturing/Awaiting/Deciding 중 정확히
    /// 하나만 활성일 수 있다 — 워크플로우 전체의 single-flight 보장.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            WorkflowState::Capturing | WorkflowState::Awaiting | WorkflowState::Deciding
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_states() {
        assert!(WorkflowState::Capturing.is_busy());
        assert!(WorkflowState::Awaiting.is_busy());
        assert!(WorkflowState::Deciding.is_busy());
        assert!(!WorkflowState::Idle.is_busy());
        assert!(!WorkflowState::Completed.is_busy());
        assert!(!WorkflowState::Aborted.is_busy());
    }
}
