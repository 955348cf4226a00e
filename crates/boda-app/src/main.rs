//! BODA — 화면을 보고 다음 행동을 제안하는 시각 자동화 어시스턴트.
//!
//! 조작자가 목표를 제출하면 화면을 캡처해 분석 프로세스에 보내고,
//! 제안된 단계를 주석과 함께 보여준 뒤 판정(ok/fail/abort)을
//! 기다린다. 완료 신호가 올 때까지 반복한다.

mod capture;
mod console;
mod lifecycle;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use boda_backend::BackendChannel;
use boda_core::models::task::OperatorDecision;
use boda_core::ports::analyzer::Analyzer;
use boda_core::ports::capture::ScreenCapture;
use boda_core::ports::renderer::OverlayRenderer;
use boda_core::ConfigManager;
use boda_overlay::GeometrySource;
use boda_workflow::WorkflowOrchestrator;

use crate::capture::CommandCapture;
use crate::console::{ConsoleRenderer, StaticGeometryProbe};
use crate::lifecycle::Lifecycle;

#[derive(Parser, Debug)]
#[command(name = "boda", version, about = "시각 자동화 어시스턴트")]
struct Args {
    /// 시작하자마자 제출할 목표
    goal: Option<String>,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 로그 레벨 (RUST_LOG가 설정돼 있으면 그쪽이 우선)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 백엔드 명령 오버라이드 (예: "python3 backend/main.py")
    #[arg(long)]
    backend_cmd: Option<String>,

    /// 백엔드 응답 타임아웃 오버라이드 (밀리초)
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone())?,
        None => ConfigManager::new()?,
    };
    let mut config = manager.config();
    if let Some(cmd) = &args.backend_cmd {
        let mut parts = cmd.split_whitespace().map(str::to_string);
        if let Some(program) = parts.next() {
            config.backend.command = program;
            config.backend.args = parts.collect();
        }
    }
    if let Some(timeout) = args.timeout {
        config.backend.timeout_ms = timeout;
    }

    info!(config_path = %manager.config_path().display(), "BODA 시작");

    let channel = Arc::new(BackendChannel::spawn(&config.backend)?);
    let analyzer: Arc<dyn Analyzer> = channel.clone();
    let screen_capture: Arc<dyn ScreenCapture> =
        Arc::new(CommandCapture::new(config.capture.clone()));
    let renderer: Arc<dyn OverlayRenderer> = Arc::new(ConsoleRenderer);
    let geometry = GeometrySource::new(Arc::new(StaticGeometryProbe::from_display(
        &config.display,
    )));

    let orchestrator = Arc::new(WorkflowOrchestrator::new(
        screen_capture,
        analyzer,
        renderer,
        geometry,
    ));

    let lifecycle = Lifecycle::new();
    lifecycle.spawn_signal_listener();
    let shutdown_rx = lifecycle.subscribe();

    if let Some(goal) = args.goal {
        if let Err(e) = orchestrator.submit_goal(goal).await {
            error!(error = %e, "초기 목표 처리 실패");
        }
    }

    info!("입력: ok(성공) / fail(실패) / abort(중단) / 그 외 텍스트는 새 목표");
    run_operator_loop(orchestrator, shutdown_rx).await;

    channel.shutdown().await;
    info!("BODA 종료");
    Ok(())
}

/// 표준 입력에서 조작자 이벤트를 읽는 루프.
///
/// 단축키든 버튼이든 최종적으로는 같은 판정 이벤트로 수렴한다 —
/// 이벤트의 출처는 상태 머신과 무관하다.
async fn run_operator_loop(
    orchestrator: Arc<WorkflowOrchestrator>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let result = match input {
                    "ok" => orchestrator.decide(OperatorDecision::Success).await,
                    "fail" => orchestrator.decide(OperatorDecision::Failure).await,
                    "abort" => orchestrator.decide(OperatorDecision::Abort).await,
                    goal => orchestrator.submit_goal(goal.to_string()).await,
                };
                if let Err(e) = result {
                    error!(error = %e, "조작자 입력 처리 실패");
                }
            }
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
