//! 실행(run) 결과 모델.
//!
//! 캡처 루프 한 번의 종료 상태와 누적 통계.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 정상 종료 상태
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// 사용자 중지 요청
    Stopped,
    /// 추적 중인 창이 닫힘
    WindowLost,
}

/// 실행 누적 통계
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunStats {
    /// 루프 시작 시각
    pub started_at: DateTime<Utc>,
    /// 루프 종료 시각
    pub ended_at: Option<DateTime<Utc>>,
    /// 표시한 프레임 수
    pub frames_presented: u64,
    /// 향상에 성공한 프레임 수
    pub frames_enhanced: u64,
    /// 향상 실패로 원본을 표시한 횟수
    pub enhancement_failures: u64,
    /// 최소화 상태로 건너뛴 반복 수
    pub minimized_skips: u64,
    /// 출력 창 리사이즈 횟수
    pub surface_resizes: u64,
    /// 마지막으로 보고된 FPS
    pub last_fps: Option<f64>,
}

impl RunStats {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            ended_at: None,
            frames_presented: 0,
            frames_enhanced: 0,
            enhancement_failures: 0,
            minimized_skips: 0,
            surface_resizes: 0,
            last_fps: None,
        }
    }
}

/// `Ok` 실행 결과
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub stats: RunStats,
}
