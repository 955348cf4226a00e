//! 분석 백엔드 어댑터.
//!
//! `Analyzer` 포트의 구현 — 장수명 자식 프로세스와
//! JSON over stdio로 통신한다.

pub mod channel;
pub mod codec;

pub use channel::BackendChannel;
