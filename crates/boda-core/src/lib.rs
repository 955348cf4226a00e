//! BODA 코어 크레이트.
//!
//! 시각 자동화 어시스턴트의 도메인 모델, 포트(trait), 에러 타입,
//! 설정을 정의한다. 어댑터 구현은 각 어댑터 crate에 있다:
//!
//! - `boda-backend`: 분석 프로세스 채널 (JSON over stdio)
//! - `boda-overlay`: 좌표 매핑 파이프라인
//! - `boda-workflow`: 워크플로우 오케스트레이터
//! - `boda-app`: 와이어링 + CLI

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

pub use config::AppConfig;
pub use config_manager::ConfigManager;
pub use error::CoreError;
