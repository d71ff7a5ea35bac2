//! # enhancer-display
//!
//! `Presenter` 포트 어댑터.
//!
//! - [`headless::HeadlessPresenter`]: 화면 없이 표시 통계만 집계 (항상 사용 가능)
//! - `highgui::HighGuiPresenter`: OpenCV HighGUI 창 (`highgui` feature)
//!
//! 두 어댑터 모두 `tokio::sync::watch` 종료 신호를 `poll_cancel`에서 확인한다.

pub mod headless;
#[cfg(feature = "highgui")]
pub mod highgui;

use tokio::sync::watch;

/// 종료 신호가 발송되었는지 (송신 측이 사라진 경우도 종료로 본다)
pub(crate) fn shutdown_requested(shutdown: &Option<watch::Receiver<bool>>) -> bool {
    match shutdown {
        Some(rx) => *rx.borrow() || rx.has_changed().is_err(),
        None => false,
    }
}
