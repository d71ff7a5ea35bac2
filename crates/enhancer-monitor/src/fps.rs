//! FPS 측정기.
//!
//! 1초(설정 가능) 롤링 윈도우마다 달성 FPS를 계산한다.
//! 시각을 인자로 받아 테스트에서 시계를 주입할 수 있다.

use enhancer_core::models::telemetry::{FpsReport, TelemetrySample};
use std::time::{Duration, Instant};
use tracing::info;

/// FPS 측정기
#[derive(Debug, Clone)]
pub struct FpsMeter {
    sample: TelemetrySample,
    interval: Duration,
}

impl FpsMeter {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            sample: TelemetrySample::starting_at(now),
            interval,
        }
    }

    /// 프레임 하나 집계
    pub fn record_frame(&mut self) {
        self.sample.frames_since_report += 1;
    }

    /// 현재 윈도우 상태
    pub fn sample(&self) -> TelemetrySample {
        self.sample
    }

    /// 윈도우가 끝났으면 FPS를 계산하고 윈도우를 리셋
    pub fn poll(&mut self, now: Instant) -> Option<FpsReport> {
        let elapsed = now.saturating_duration_since(self.sample.window_start);
        if elapsed < self.interval {
            return None;
        }

        let frames = self.sample.frames_since_report;
        let fps = frames as f64 / elapsed.as_secs_f64();
        self.sample = TelemetrySample::starting_at(now);
        Some(FpsReport {
            frames,
            elapsed,
            fps,
        })
    }

    /// `poll` 후 보고가 있으면 로그로 내보냄
    pub fn poll_and_report(&mut self, now: Instant) -> Option<FpsReport> {
        let report = self.poll(now)?;
        info!("FPS: {:.2}", report.fps);
        Some(report)
    }
}
