//! 종료 신호 관리.
//!
//! 캡처 루프는 비동기 태스크가 아니라 `spawn_blocking` 스레드에서 돈다.
//! 그래서 OS 시그널(SIGINT, SIGTERM, Ctrl+C)을 `watch` 채널 값으로 바꿔
//! 출력 창(`Presenter::poll_cancel`)이 읽게 한다. 루프는 다음 반복의
//! 중지 확인에서 `STOPPED`로 끝나고, 출력 창 해제도 그 경로를 탄다.
//!
//! 시그널 핸들러 등록이 실패해도 패닉하지 않는다. Ctrl+C 대기로 물러나고,
//! 그마저 실패하면 출력 창의 중지 키만 남는다.

use tokio::sync::watch;
use tracing::{info, warn};

/// 종료 신호 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    /// 종료 수신기 복제
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// 종료 신호 발송
    pub fn shutdown(&self) {
        if !*self.shutdown_rx.borrow() {
            info!("종료 신호 발송");
        }
        let _ = self.shutdown_tx.send(true);
    }

    /// 시그널로 종료가 요청됐는지 (중지 키와 구분용)
    pub fn is_shutdown_requested(&self) -> bool {
        *self.shutdown_rx.borrow()
    }

    /// OS 시그널 대기 후 종료 신호 발송
    pub async fn wait_for_signal(&self) {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match (
                signal(SignalKind::interrupt()),
                signal(SignalKind::terminate()),
            ) {
                (Ok(mut sigint), Ok(mut sigterm)) => {
                    tokio::select! {
                        _ = sigint.recv() => info!("SIGINT 수신"),
                        _ = sigterm.recv() => info!("SIGTERM 수신"),
                    }
                }
                _ => {
                    warn!("시그널 핸들러 등록 실패, Ctrl+C만 대기");
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        warn!("Ctrl+C 핸들러 등록 실패: {e}");
                        return;
                    }
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Ctrl+C 핸들러 등록 실패: {e}");
                return;
            }
            info!("Ctrl+C 수신");
        }

        self.shutdown();
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_shutdown() {
        let lm = LifecycleManager::new();
        assert!(!*lm.subscribe().borrow());
        assert!(!lm.is_shutdown_requested());
    }

    #[test]
    fn shutdown_reaches_subscribers() {
        let lm = LifecycleManager::new();
        let rx = lm.subscribe();
        lm.shutdown();
        lm.shutdown();
        assert!(*rx.borrow());
        assert!(lm.is_shutdown_requested());
    }
}
