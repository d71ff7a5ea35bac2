//! # enhancer-monitor
//!
//! 창 추적 어댑터.
//! 제목으로 대상 창을 찾고, 매 반복 생존 여부와 지오메트리를 다시 확인하며,
//! 달성 FPS를 1초 롤링 윈도우로 측정한다.
//! 창 열거는 xcap, Windows에서는 Win32 API로 빠른 경로를 탄다.

pub mod fps;
pub mod geometry;
pub mod locator;

#[cfg(target_os = "windows")]
pub mod windows;
