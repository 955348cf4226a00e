//! 백엔드 와이어 프로토콜.
//!
//! 분석 프로세스와의 경계 계약 — 비트 단위로 정확해야 한다.
//! 요청: `{screenshot_path, prompt, history, action:"process_screenshot"}`
//! + 개행. 응답: `{status:"completed", message?}` 또는
//! `{task:{step,action}, highlighting_boxes:[{x,y,width,height},...]}`.
//! `highlighting_boxes`가 정식 표기이며, 호환을 위해
//! `highlightingBoxes`도 수신 시에만 허용한다.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::geometry::NormalizedRect;
use crate::models::task::{StepOutcome, Task};

/// 요청 액션 식별자
pub const ACTION_PROCESS_SCREENSHOT: &str = "process_screenshot";

/// 완료 상태 식별자
pub const STATUS_COMPLETED: &str = "completed";

/// analyze 요청 — 한 줄의 JSON으로 직렬화된다
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// 스크린샷 파일 경로
    pub screenshot_path: String,
    /// 조작자가 제출한 목표
    pub prompt: String,
    /// 지금까지 판정된 단계 이력 (판정 순서대로)
    pub history: Vec<StepOutcome>,
    /// 액션 식별자 (항상 "process_screenshot")
    pub action: String,
}

impl AnalyzeRequest {
    /// 새 요청 생성
    pub fn new(screenshot_path: String, prompt: String, history: Vec<StepOutcome>) -> Self {
        Self {
            screenshot_path,
            prompt,
            history,
            action: ACTION_PROCESS_SCREENSHOT.to_string(),
        }
    }

    /// 개행으로 끝나는 요청 라인 직렬화
    pub fn to_wire_line(&self) -> Result<String, CoreError> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// 응답 라인의 원시 형태.
///
/// 백엔드 구현에 따라 부가 필드가 섞여 올 수 있으므로
/// 전부 Option으로 받고 [`AnalyzeResponse`]로 검증 변환한다.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResponse {
    /// 상태 문자열 ("completed" 외에는 무시되거나 에러)
    pub status: Option<String>,
    /// 상태에 딸린 메시지
    pub message: Option<String>,
    /// 제안된 다음 단계
    pub task: Option<RawTask>,
    /// 단계의 대상 영역 (모니터 비율 좌표)
    #[serde(alias = "highlightingBoxes")]
    pub highlighting_boxes: Option<Vec<NormalizedRect>>,
}

/// 원시 task 필드 — {step, action}
#[derive(Debug, Clone, Deserialize)]
pub struct RawTask {
    pub step: u32,
    pub action: String,
}

/// 검증된 analyze 응답
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeResponse {
    /// 목표 완료
    Completed {
        /// 완료 메시지 (없을 수 있음)
        message: Option<String>,
    },
    /// 다음 단계 제안
    NextStep(Task),
}

impl TryFrom<RawResponse> for AnalyzeResponse {
    type Error = CoreError;

    /// 원시 응답을 두 가지 유효한 형태 중 하나로 변환한다.
    ///
    /// task가 있으면 NextStep, status가 "completed"면 Completed.
    /// 둘 다 아니면 워크플로우 에러가 아닌 프로토콜 에러다.
    fn try_from(raw: RawResponse) -> Result<Self, CoreError> {
        if let Some(task) = raw.task {
            return Ok(AnalyzeResponse::NextStep(Task {
                step: task.step,
                action: task.action,
                regions: raw.highlighting_boxes.unwrap_or_default(),
            }));
        }

        match raw.status.as_deref() {
            Some(STATUS_COMPLETED) => Ok(AnalyzeResponse::Completed {
                message: raw.message,
            }),
            Some(other) => Err(CoreError::Protocol(format!(
                "응답 상태 '{}'{}",
                other,
                raw.message
                    .map(|m| format!(": {m}"))
                    .unwrap_or_default()
            ))),
            None => Err(CoreError::Protocol(
                "status와 task가 모두 없는 응답".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::StepStatus;
    use assert_matches::assert_matches;

    #[test]
    fn request_wire_line_shape() {
        let request = AnalyzeRequest::new(
            "/tmp/a.png".to_string(),
            "find submit button".to_string(),
            vec![StepOutcome {
                step: 1,
                action: "click submit".to_string(),
                status: StepStatus::Failure,
            }],
        );

        let line = request.to_wire_line().unwrap();
        assert!(line.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["screenshot_path"], "/tmp/a.png");
        assert_eq!(value["prompt"], "find submit button");
        assert_eq!(value["action"], "process_screenshot");
        assert_eq!(value["history"][0]["status"], "failure");
    }

    #[test]
    fn completed_response() {
        let raw: RawResponse =
            serde_json::from_str(r#"{"status":"completed","message":"Done"}"#).unwrap();
        let response = AnalyzeResponse::try_from(raw).unwrap();
        assert_eq!(
            response,
            AnalyzeResponse::Completed {
                message: Some("Done".to_string())
            }
        );
    }

    #[test]
    fn next_step_response() {
        let raw: RawResponse = serde_json::from_str(
            r#"{"status":"success",
                "task":{"step":1,"action":"click submit"},
                "highlighting_boxes":[{"x":0.5,"y":0.8,"width":0.1,"height":0.05}]}"#,
        )
        .unwrap();

        let response = AnalyzeResponse::try_from(raw).unwrap();
        let AnalyzeResponse::NextStep(task) = response else {
            panic!("NextStep이어야 함");
        };
        assert_eq!(task.step, 1);
        assert_eq!(task.action, "click submit");
        assert_eq!(task.regions.len(), 1);
        assert_eq!(task.regions[0].x, 0.5);
    }

    #[test]
    fn camel_case_alias_accepted() {
        let raw: RawResponse = serde_json::from_str(
            r#"{"task":{"step":2,"action":"scroll down"},
                "highlightingBoxes":[]}"#,
        )
        .unwrap();

        let response = AnalyzeResponse::try_from(raw).unwrap();
        assert_matches!(response, AnalyzeResponse::NextStep(task) if task.regions.is_empty());
    }

    #[test]
    fn error_status_is_protocol_error() {
        let raw: RawResponse =
            serde_json::from_str(r#"{"status":"error","message":"boom"}"#).unwrap();
        assert_matches!(
            AnalyzeResponse::try_from(raw),
            Err(CoreError::Protocol(msg)) if msg.contains("boom")
        );
    }

    #[test]
    fn empty_object_is_protocol_error() {
        let raw: RawResponse = serde_json::from_str("{}").unwrap();
        assert_matches!(
            AnalyzeResponse::try_from(raw),
            Err(CoreError::Protocol(_))
        );
    }
}
