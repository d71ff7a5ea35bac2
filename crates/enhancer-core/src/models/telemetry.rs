//! 텔레메트리 모델.
//!
//! 1초 롤링 윈도우 FPS 측정 상태와 보고 결과.

use std::time::{Duration, Instant};

/// 현재 롤링 윈도우 상태 (영속화하지 않음)
#[derive(Debug, Clone, Copy)]
pub struct TelemetrySample {
    /// 마지막 보고 이후 표시한 프레임 수
    pub frames_since_report: u64,
    /// 현재 윈도우 시작 시각
    pub window_start: Instant,
}

impl TelemetrySample {
    pub fn starting_at(window_start: Instant) -> Self {
        Self {
            frames_since_report: 0,
            window_start,
        }
    }
}

/// 윈도우 하나를 닫을 때 산출되는 FPS 보고
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FpsReport {
    /// 윈도우 동안 표시한 프레임 수
    pub frames: u64,
    /// 실제 경과 시간
    pub elapsed: Duration,
    /// 초당 프레임
    pub fps: f64,
}
