//! BODA 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 실패를 `CoreError`로 매핑하여 반환한다.
//! 채널 계열 에러(ChannelDown/ChannelTimeout/ChannelBusy/Protocol)는
//! 해당 analyze 호출만 실패시키며, 채널 자체를 죽이지 않는다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 캡처, 백엔드 채널, 좌표 매핑, 설정 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 스크린 캡처 실패 (OS 명령 없음, 파일 미생성 등)
    #[error("캡처 에러: {0}")]
    Capture(String),

    /// 백엔드 프로세스 미실행/종료 또는 스트림 에러
    #[error("백엔드 채널 다운: {0}")]
    ChannelDown(String),

    /// 제한 시간 내 유효한 응답 없음
    #[error("백엔드 응답 타임아웃: {timeout_ms}ms 초과")]
    ChannelTimeout {
        /// 초과된 타임아웃 시간 (밀리초)
        timeout_ms: u64,
    },

    /// 이미 진행 중인 요청이 있음 (single-flight 위반)
    #[error("백엔드 채널 사용 중 — 이전 요청이 아직 진행 중")]
    ChannelBusy,

    /// JSON으로 파싱되지만 응답 형태가 아닌 라인
    #[error("프로토콜 에러: {0}")]
    Protocol(String),

    /// 지오메트리 정보 없음 — 복구 가능, 폴백 후 로그만 남긴다
    #[error("매핑 성능 저하: {0}")]
    MappingDegraded(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}
