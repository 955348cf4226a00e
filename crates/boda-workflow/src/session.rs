//! 세션 — 목표 하나의 수명.
//!
//! 오케스트레이터만 소유/변경한다. 새 목표 제출 또는 완료 시
//! 통째로 교체된다.

use chrono::{DateTime, Utc};

use boda_core::models::task::Task;

use crate::history::StepHistory;

/// 조작자가 제출한 목표 하나에 대응하는 세션
#[derive(Debug, Clone)]
pub struct Session {
    /// 자연어 목표
    pub goal: String,
    /// 제출 시각
    pub started_at: DateTime<Utc>,
    /// 판정된 단계 이력
    pub history: StepHistory,
    /// 판정 대기 중인 단계. 이력에는 판정 후에만 들어간다
    pub current_task: Option<Task>,
}

impl Session {
    /// 새 세션 시작
    pub fn new(goal: String) -> Self {
        Self {
            goal,
            started_at: Utc::now(),
            history: StepHistory::new(),
            current_task: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_clean() {
        let session = Session::new("로그인하기".to_string());
        assert_eq!(session.goal, "로그인하기");
        assert!(session.history.is_empty());
        assert!(session.current_task.is_none());
    }
}
