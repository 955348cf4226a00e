//! 종료 수명주기.
//!
//! watch 채널 하나로 종료를 전파한다. OS 시그널(SIGINT/SIGTERM)을
//! 받으면 모든 구독자가 루프를 빠져나온다.

use tokio::sync::watch;
use tracing::info;

/// 종료 신호 배포자
pub struct Lifecycle {
    shutdown_tx: watch::Sender<bool>,
}

impl Lifecycle {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self { shutdown_tx }
    }

    /// 종료 신호 구독
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// 종료 신호 발신
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// OS 종료 시그널을 기다렸다가 종료를 전파하는 태스크를 띄운다
    pub fn spawn_signal_listener(&self) {
        let tx = self.shutdown_tx.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            info!("종료 시그널 수신");
            let _ = tx.send(true);
        });
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "SIGTERM 핸들러 등록 실패");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
