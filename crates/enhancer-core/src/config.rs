//! 애플리케이션 설정 구조체.
//!
//! 지오메트리 재확인 주기, 리사이즈 허용 오차, 샘플링 청크 크기,
//! 추론 계획 캐시, 출력 창, 텔레메트리 주기 등 런타임 설정을 정의한다.
//! `ConfigManager`를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 캡처/창 추적 설정
    #[serde(default)]
    pub capture: CaptureConfig,
    /// 청크 샘플링 설정
    #[serde(default)]
    pub sampling: SamplingConfig,
    /// 추론 설정
    #[serde(default)]
    pub inference: InferenceConfig,
    /// 출력 창 설정
    #[serde(default)]
    pub display: DisplayConfig,
    /// 텔레메트리 설정
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// 기본 설정
    pub fn default_config() -> Self {
        Self::default()
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.capture.geometry_check_interval == 0 {
            return Err(invalid("capture.geometry_check_interval", "0보다 커야 함"));
        }
        if self.sampling.chunk_size == 0 {
            return Err(invalid("sampling.chunk_size", "0보다 커야 함"));
        }
        if self.inference.plan_cache_capacity == 0 {
            return Err(invalid("inference.plan_cache_capacity", "0보다 커야 함"));
        }
        if self.telemetry.report_interval_ms == 0 {
            return Err(invalid("telemetry.report_interval_ms", "0보다 커야 함"));
        }
        if self.display.window_name.trim().is_empty() {
            return Err(invalid("display.window_name", "비어 있을 수 없음"));
        }
        if !self.display.cancel_key.is_ascii() {
            return Err(invalid("display.cancel_key", "ASCII 문자여야 함"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> CoreError {
    CoreError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

// ============================================================
// 캡처 설정
// ============================================================

/// 캡처/창 추적 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// 창 크기 재확인 주기 (프레임 수)
    #[serde(default = "default_geometry_check_interval")]
    pub geometry_check_interval: u64,
    /// 리사이즈로 간주할 최소 크기 변화 (픽셀, 초과 시 리사이즈)
    #[serde(default = "default_resize_tolerance_px")]
    pub resize_tolerance_px: u32,
    /// 최소화 상태에서 다음 반복까지 대기 (밀리초)
    #[serde(default = "default_minimized_backoff_ms")]
    pub minimized_backoff_ms: u64,
}

impl CaptureConfig {
    pub fn minimized_backoff(&self) -> Duration {
        Duration::from_millis(self.minimized_backoff_ms)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            geometry_check_interval: default_geometry_check_interval(),
            resize_tolerance_px: default_resize_tolerance_px(),
            minimized_backoff_ms: default_minimized_backoff_ms(),
        }
    }
}

fn default_geometry_check_interval() -> u64 {
    5
}

fn default_resize_tolerance_px() -> u32 {
    10
}

fn default_minimized_backoff_ms() -> u64 {
    100
}

// ============================================================
// 샘플링 설정
// ============================================================

/// 청크 샘플링 설정: 청크당 한 프레임만 향상
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// 청크 크기 (프레임 수)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,
    /// 난수 시드 (None이면 엔트로피에서 시드)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            seed: None,
        }
    }
}

fn default_chunk_size() -> u64 {
    5
}

// ============================================================
// 추론 설정
// ============================================================

/// 추론 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// 입력 크기별 최적화 계획 캐시 용량
    #[serde(default = "default_plan_cache_capacity")]
    pub plan_cache_capacity: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            plan_cache_capacity: default_plan_cache_capacity(),
        }
    }
}

fn default_plan_cache_capacity() -> usize {
    4
}

// ============================================================
// 출력 창 설정
// ============================================================

/// 출력 창 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// 출력 창 이름
    #[serde(default = "default_window_name")]
    pub window_name: String,
    /// 중지 키 (출력 창 포커스 상태에서)
    #[serde(default = "default_cancel_key")]
    pub cancel_key: char,
    /// 헤드리스 모드에서 자동 중지할 프레임 수 (None이면 무제한)
    #[serde(default)]
    pub max_frames: Option<u64>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_name: default_window_name(),
            cancel_key: default_cancel_key(),
            max_frames: None,
        }
    }
}

fn default_window_name() -> String {
    "Overlay".to_string()
}

fn default_cancel_key() -> char {
    'q'
}

// ============================================================
// 텔레메트리 설정
// ============================================================

/// 텔레메트리 설정: FPS 보고 주기
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// FPS 보고 주기 (밀리초)
    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,
}

impl TelemetryConfig {
    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            report_interval_ms: default_report_interval_ms(),
        }
    }
}

fn default_report_interval_ms() -> u64 {
    1_000
}
