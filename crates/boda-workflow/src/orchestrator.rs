//! 워크플로우 오케스트레이터.
//!
//! `Idle → Capturing → Awaiting → Deciding → Capturing …` 순환을
//! 구동하는 상태 머신. 모든 전이는 (상태, 이벤트)의 전함수이며,
//! Capturing/Awaiting/Deciding 중 정확히 하나만 활성일 수 있다.
//!
//! 바쁜 상태에서의 `submit_goal`과 Deciding 밖에서의 판정 이벤트는
//! 큐잉하지 않고 로그 후 무시한다. 캡처/채널/프로토콜 에러는
//! 렌더러의 에러 알림으로 표면화하고 Idle로 돌아간다 — Deciding
//! 안에서 삼켜지는 에러는 없다.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use boda_core::error::CoreError;
use boda_core::models::protocol::{AnalyzeRequest, AnalyzeResponse};
use boda_core::models::session::WorkflowState;
use boda_core::models::task::{OperatorDecision, StepOutcome, StepStatus, Task};
use boda_core::ports::analyzer::Analyzer;
use boda_core::ports::capture::ScreenCapture;
use boda_core::ports::renderer::{OverlayRenderer, StepPresentation};
use boda_overlay::mapper;
use boda_overlay::GeometrySource;

use crate::session::Session;

struct Inner {
    state: WorkflowState,
    session: Option<Session>,
}

/// 워크플로우 상태 머신.
///
/// 포트 네 개와 지오메트리 공급원을 쥐고 한 사이클을
/// 캡처 → 분석 → 표시 순서로 구동한다.
pub struct WorkflowOrchestrator {
    capture: Arc<dyn ScreenCapture>,
    analyzer: Arc<dyn Analyzer>,
    renderer: Arc<dyn OverlayRenderer>,
    geometry: GeometrySource,
    inner: Mutex<Inner>,
}

impl WorkflowOrchestrator {
    /// 포트 와이어링
    pub fn new(
        capture: Arc<dyn ScreenCapture>,
        analyzer: Arc<dyn Analyzer>,
        renderer: Arc<dyn OverlayRenderer>,
        geometry: GeometrySource,
    ) -> Self {
        Self {
            capture,
            analyzer,
            renderer,
            geometry,
            inner: Mutex::new(Inner {
                state: WorkflowState::Idle,
                session: None,
            }),
        }
    }

    /// 현재 상태
    pub fn state(&self) -> WorkflowState {
        self.lock().state
    }

    /// 현재 세션 이력의 복사본 (없으면 빈 벡터)
    pub fn history(&self) -> Vec<StepOutcome> {
        self.lock()
            .session
            .as_ref()
            .map(|s| s.history.to_wire())
            .unwrap_or_default()
    }

    /// 새 목표 제출.
    ///
    /// 사이클 진행 중이면 무시된다 (no-op). 아니면 세션을
    /// 리셋하고 첫 사이클을 구동한다.
    pub async fn submit_goal(&self, goal: String) -> Result<(), CoreError> {
        {
            let mut inner = self.lock();
            if inner.state.is_busy() {
                warn!(state = ?inner.state, "사이클 진행 중 — 목표 제출 무시");
                return Ok(());
            }
            info!(goal = %goal, "새 목표 제출");
            inner.session = Some(Session::new(goal));
            inner.state = WorkflowState::Capturing;
        }
        // 렌더러 실패도 사이클 실패다 — 그대로 전파하면 Capturing에
        // 갇힌 채 이후 제출이 전부 무시된다
        if let Err(e) = self.renderer.clear().await {
            return self.fail_cycle(e).await;
        }
        self.run_cycle().await
    }

    /// 조작자 판정.
    ///
    /// Deciding 상태가 아니면 로그 후 무시한다. 성공/실패는 이력에
    /// 기록하고 다음 사이클로, 중단은 `Aborted`로 흡수된다.
    pub async fn decide(&self, decision: OperatorDecision) -> Result<(), CoreError> {
        let advance = {
            let mut inner = self.lock();
            if inner.state != WorkflowState::Deciding {
                warn!(?decision, state = ?inner.state, "Deciding 상태가 아님 — 판정 무시");
                return Ok(());
            }
            let session = inner
                .session
                .as_mut()
                .ok_or_else(|| CoreError::Internal("Deciding 상태에 세션 없음".to_string()))?;
            let task = session
                .current_task
                .take()
                .ok_or_else(|| CoreError::Internal("Deciding 상태에 현재 단계 없음".to_string()))?;

            match decision {
                OperatorDecision::Success => {
                    session.history.record(outcome(&task, StepStatus::Success));
                    inner.state = WorkflowState::Capturing;
                    true
                }
                OperatorDecision::Failure => {
                    session.history.record(outcome(&task, StepStatus::Failure));
                    inner.state = WorkflowState::Capturing;
                    true
                }
                OperatorDecision::Abort => {
                    info!(step = task.step, "조작자 중단");
                    inner.state = WorkflowState::Aborted;
                    false
                }
            }
        };

        if advance {
            self.run_cycle().await
        } else {
            self.renderer.clear().await
        }
    }

    /// 한 사이클: 캡처 → 분석 → 완료/표시/실패
    async fn run_cycle(&self) -> Result<(), CoreError> {
        let path = match self.capture.capture().await {
            Ok(path) => path,
            Err(e) => return self.fail_cycle(e).await,
        };

        let request = {
            let mut inner = self.lock();
            let session = inner
                .session
                .as_ref()
                .ok_or_else(|| CoreError::Internal("사이클 진행 중 세션 없음".to_string()))?;
            let request = AnalyzeRequest::new(
                path.to_string_lossy().into_owned(),
                session.goal.clone(),
                session.history.to_wire(),
            );
            inner.state = WorkflowState::Awaiting;
            request
        };

        match self.analyzer.analyze(request).await {
            Ok(AnalyzeResponse::Completed { message }) => self.complete(message).await,
            Ok(AnalyzeResponse::NextStep(task)) => self.present(task).await,
            Err(e) => self.fail_cycle(e).await,
        }
    }

    /// 단계 표시 후 Deciding 진입
    async fn present(&self, task: Task) -> Result<(), CoreError> {
        let presentation = self.build_presentation(&task).await;
        {
            let mut inner = self.lock();
            if let Some(session) = inner.session.as_mut() {
                session.current_task = Some(task);
            }
            inner.state = WorkflowState::Deciding;
        }
        if let Err(e) = self.renderer.present_step(&presentation).await {
            return self.fail_cycle(e).await;
        }
        Ok(())
    }

    /// 단계를 표시 내용으로 변환.
    ///
    /// 지오메트리를 못 구해도 실패하지 않는다 — 주석 없이 액션
    /// 텍스트만 표시한다. 조작자는 항상 단계 또는 명시적 실패를 본다.
    async fn build_presentation(&self, task: &Task) -> StepPresentation {
        let scroll = task.scroll_direction();
        let annotations = if scroll.is_some() || task.regions.is_empty() {
            Vec::new()
        } else {
            match self.geometry.snapshot().await {
                Ok(snapshot) => mapper::map_task(task, &snapshot),
                Err(e) => {
                    warn!(error = %e, "지오메트리 확인 불가 — 주석 없이 표시");
                    Vec::new()
                }
            }
        };
        StepPresentation {
            action: task.action.clone(),
            annotations,
            scroll,
        }
    }

    /// 완료 처리: 이력/단계 정리 후 알림
    async fn complete(&self, message: Option<String>) -> Result<(), CoreError> {
        {
            let mut inner = self.lock();
            inner.state = WorkflowState::Completed;
            if let Some(session) = inner.session.as_mut() {
                session.history.clear();
                session.current_task = None;
            }
        }
        info!("목표 완료");
        self.renderer.clear().await?;
        self.renderer
            .notify_completed(message.as_deref().unwrap_or("작업이 완료되었습니다"))
            .await
    }

    /// 사이클 실패: Idle 복귀 + 에러 표면화. 이력은 보존된다
    async fn fail_cycle(&self, error: CoreError) -> Result<(), CoreError> {
        warn!(error = %error, "사이클 실패 — Idle 복귀");
        {
            let mut inner = self.lock();
            inner.state = WorkflowState::Idle;
            if let Some(session) = inner.session.as_mut() {
                session.current_task = None;
            }
        }
        self.renderer.notify_error(&error.to_string()).await
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn outcome(task: &Task, status: StepStatus) -> StepOutcome {
    StepOutcome {
        step: task.step,
        action: task.action.clone(),
        status,
    }
}
