//! 분석 프로세스 채널.
//!
//! 장수명 자식 프로세스를 하나 띄우고, stdin으로 요청 한 줄을 쓰고
//! stdout에서 응답 한 줄을 찾는다. 동시 요청은 허용하지 않으며
//! (단일 비행), 타임아웃된 호출의 늦은 응답은 다음 호출을
//! 해결하지 못한다 — 새 요청 전에 잔여 라인을 모두 폐기한다.
//!
//! 프로세스가 죽어도 채널은 재시작하지 않는다. 이후 호출은
//! `ChannelDown`을 반환하고, 복구는 상위 레이어의 몫이다.

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::{mpsc, Mutex};
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use boda_core::config::BackendConfig;
use boda_core::error::CoreError;
use boda_core::models::protocol::{AnalyzeRequest, AnalyzeResponse};
use boda_core::ports::analyzer::Analyzer;

use crate::codec;

/// analyze 한 번이 독점하는 통신 자원
struct CallState {
    stdin: ChildStdin,
    rx: mpsc::UnboundedReceiver<String>,
}

/// 분석 프로세스와의 JSON over stdio 채널.
///
/// `Analyzer` 포트 구현체. 생성 시 자식 프로세스를 스폰하고,
/// 스트림마다 리더 태스크를 하나씩 띄운다.
pub struct BackendChannel {
    call: Mutex<CallState>,
    child: Mutex<Child>,
    alive: Arc<AtomicBool>,
    timeout: Duration,
    timeout_ms: u64,
}

impl BackendChannel {
    /// 설정된 명령으로 자식 프로세스를 스폰한다
    pub fn spawn(config: &BackendConfig) -> Result<Self, CoreError> {
        let mut command = Command::new(&config.command);
        command
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &config.working_dir {
            command.current_dir(dir);
        }

        let mut child = command.spawn().map_err(|e| {
            CoreError::ChannelDown(format!("분석 프로세스 실행 실패 ({}): {e}", config.command))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| CoreError::Internal("자식 프로세스 stdin 파이프 없음".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CoreError::Internal("자식 프로세스 stdout 파이프 없음".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| CoreError::Internal("자식 프로세스 stderr 파이프 없음".to_string()))?;

        info!(command = %config.command, "분석 프로세스 시작");

        let alive = Arc::new(AtomicBool::new(true));
        let (tx, rx) = mpsc::unbounded_channel();

        let reader_alive = Arc::clone(&alive);
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!(error = %e, "stdout 읽기 실패");
                        break;
                    }
                }
            }
            reader_alive.store(false, Ordering::SeqCst);
            debug!("분석 프로세스 stdout 종료");
        });

        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(stream = "stderr", "{line}");
            }
        });

        Ok(Self {
            call: Mutex::new(CallState { stdin, rx }),
            child: Mutex::new(child),
            alive,
            timeout: config.timeout(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// 프로세스 생존 여부
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// 자식 프로세스를 종료한다 (앱 종료 시)
    pub async fn shutdown(&self) {
        let mut child = self.child.lock().await;
        if let Err(e) = child.kill().await {
            debug!(error = %e, "자식 프로세스 종료 중 오류 (이미 종료됐을 수 있음)");
        }
        self.alive.store(false, Ordering::SeqCst);
        info!("분석 프로세스 종료");
    }
}

#[async_trait]
impl Analyzer for BackendChannel {
    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalyzeResponse, CoreError> {
        // 단일 비행: 진행 중인 호출이 있으면 대기하지 않고 거부
        let mut call = self.call.try_lock().map_err(|_| CoreError::ChannelBusy)?;

        if !self.is_alive() {
            return Err(CoreError::ChannelDown(
                "분석 프로세스가 종료되었습니다".to_string(),
            ));
        }

        // 타임아웃된 이전 호출의 늦은 응답 폐기
        while let Ok(stale) = call.rx.try_recv() {
            trace!(line = %stale, "이전 호출의 잔여 라인 폐기");
        }

        let wire = request.to_wire_line()?;
        call.stdin
            .write_all(wire.as_bytes())
            .await
            .map_err(|e| CoreError::ChannelDown(format!("요청 쓰기 실패: {e}")))?;
        call.stdin
            .flush()
            .await
            .map_err(|e| CoreError::ChannelDown(format!("요청 플러시 실패: {e}")))?;

        debug!(screenshot = %request.screenshot_path, "분석 요청 전송");

        let deadline = Instant::now() + self.timeout;
        let mut received: Vec<String> = Vec::new();
        loop {
            let next = tokio::time::timeout_at(deadline, call.rx.recv()).await;
            match next {
                Err(_) => {
                    warn!(timeout_ms = self.timeout_ms, "분석 응답 제한 시간 초과");
                    return Err(CoreError::ChannelTimeout {
                        timeout_ms: self.timeout_ms,
                    });
                }
                Ok(None) => {
                    return Err(CoreError::ChannelDown(
                        "응답 대기 중 분석 프로세스 스트림이 닫혔습니다".to_string(),
                    ));
                }
                Ok(Some(line)) => {
                    received.push(line);
                    if let Some(result) = codec::find_response(&received) {
                        return result;
                    }
                }
            }
        }
    }
}
