//! 워크플로우 크레이트.
//!
//! 목표 하나의 세션, 단계 이력, 그리고 캡처 → 분석 → 표시 →
//! 판정 순환을 구동하는 오케스트레이터.

pub mod history;
pub mod orchestrator;
pub mod session;

pub use history::StepHistory;
pub use orchestrator::WorkflowOrchestrator;
pub use session::Session;
