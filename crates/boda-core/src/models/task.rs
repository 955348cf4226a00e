//! 단계(step) 도메인 모델.
//!
//! 분석기가 제안한 다음 상호작용(Task)과
//! 조작자의 판정 결과(StepOutcome)를 정의한다.

use serde::{Deserialize, Serialize};

use crate::models::geometry::NormalizedRect;

/// 분석기가 제안한 다음 단계.
///
/// 성공한 analyze() 호출마다 통째로 교체되며,
/// 조작자의 판정이 커밋되거나 하이라이트가 지워지면 비워진다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// 분석기가 부여한 단계 번호 (불투명한 순서 키)
    pub step: u32,
    /// 액션 설명 텍스트
    pub action: String,
    /// 대상 영역 (스크롤 액션에서만 비어있음)
    #[serde(default)]
    pub regions: Vec<NormalizedRect>,
}

impl Task {
    /// 스크롤 액션이면 방향 반환. 영역 대신 액션 텍스트에 방향이 실려 온다.
    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        let action = self.action.to_lowercase();
        if !action.contains("scroll") {
            return None;
        }
        if action.contains("up") {
            Some(ScrollDirection::Up)
        } else if action.contains("down") {
            Some(ScrollDirection::Down)
        } else {
            None
        }
    }
}

/// 스크롤 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// 단계 판정 상태 — 와이어 표기는 "success"/"failure"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Success,
    Failure,
}

/// 판정이 끝난 단계 기록. 이력에 한 번 추가되면 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// 단계 번호
    pub step: u32,
    /// 액션 설명
    pub action: String,
    /// 판정 상태
    pub status: StepStatus,
}

/// 조작자 판정 이벤트.
///
/// 단축키/버튼/자동 진행 등 어떤 경로에서 발생했는지는 코어와 무관하다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorDecision {
    /// 단계 성공 — 다음 단계로 진행
    Success,
    /// 단계 실패 — 같은 목표로 재시도 (실패 이력이 분석기에 전달됨)
    Failure,
    /// 세션 중단
    Abort,
}
