//! stdout 라인 스캐닝.
//!
//! 분석 프로세스의 표준 출력에는 프로토콜 응답과 진단 출력이
//! 섞여 있다. 프레이밍이 없으므로 라인 단위로 후보를 골라낸다:
//! trim 후 `{`로 시작하고 `}`로 끝나면 후보, 그중 유효 JSON만
//! 응답으로 해석한다.

use tracing::trace;

use boda_core::error::CoreError;
use boda_core::models::protocol::{AnalyzeResponse, RawResponse};

/// 프로토콜 응답 후보 여부 판별
pub fn is_candidate(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('{') && trimmed.ends_with('}')
}

/// 누적된 라인들에서 응답을 찾는다.
///
/// 가장 최근 라인부터 역방향으로 스캔한다. JSON 파싱에 실패한
/// 후보는 진단 출력으로 간주하고 건너뛴다. 유효 JSON이지만
/// 응답 형태가 아니면 `Protocol` 에러.
pub fn find_response(lines: &[String]) -> Option<Result<AnalyzeResponse, CoreError>> {
    for line in lines.iter().rev() {
        if !is_candidate(line) {
            continue;
        }
        let raw: RawResponse = match serde_json::from_str(line.trim()) {
            Ok(raw) => raw,
            Err(e) => {
                trace!(line = %line, error = %e, "JSON 파싱 불가 후보 건너뜀");
                continue;
            }
        };
        return Some(AnalyzeResponse::try_from(raw));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn candidate_requires_braces() {
        assert!(is_candidate(r#"{"status":"completed"}"#));
        assert!(is_candidate(r#"  {"a":1}  "#));
        assert!(!is_candidate("INFO: model loaded"));
        assert!(!is_candidate(r#"{"truncated":"#));
    }

    #[test]
    fn ignores_interleaved_diagnostics() {
        let input = lines(&[
            "loading model weights...",
            "{this is not json}",
            r#"{"task":{"step":1,"action":"버튼을 클릭하세요"},"highlighting_boxes":[]}"#,
        ]);
        let result = find_response(&input).unwrap().unwrap();
        assert_matches!(result, AnalyzeResponse::NextStep(task) => {
            assert_eq!(task.step, 1);
        });
    }

    #[test]
    fn newest_line_wins() {
        let input = lines(&[
            r#"{"task":{"step":1,"action":"old"}}"#,
            r#"{"task":{"step":2,"action":"new"}}"#,
        ]);
        let result = find_response(&input).unwrap().unwrap();
        assert_matches!(result, AnalyzeResponse::NextStep(task) => {
            assert_eq!(task.step, 2);
        });
    }

    #[test]
    fn valid_json_wrong_shape_is_protocol_error() {
        let input = lines(&[r#"{"unexpected":"shape"}"#]);
        let result = find_response(&input).unwrap();
        assert_matches!(result, Err(CoreError::Protocol(_)));
    }

    #[test]
    fn no_candidate_yields_none() {
        let input = lines(&["still thinking", "progress 42%"]);
        assert!(find_response(&input).is_none());
    }
}
