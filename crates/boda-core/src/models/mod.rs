//! BODA 도메인 모델.
//!
//! 워크플로우/채널/매퍼가 공유하는 핵심 데이터 구조체를 정의한다.
//! 와이어에 실리는 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod geometry;
pub mod protocol;
pub mod session;
pub mod task;
