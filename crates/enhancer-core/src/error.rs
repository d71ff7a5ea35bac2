//! Simple Enhancer 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 이 에러를 그대로 반환하고,
//! `enhancer-app`이 외부 호출자용 `RunError`로 분류한다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 제목 부분 문자열과 일치하는 보이는 창이 없음
    #[error("창 미발견: '{0}'")]
    WindowNotFound(String),

    /// 모델 파일 로드 실패 (파일 없음, 손상, 미지원 포맷)
    #[error("모델 로드 실패: {0}")]
    ModelLoad(String),

    /// 프레임 단위 향상 실패 (전처리/추론/후처리)
    #[error("향상 에러: {0}")]
    Enhancement(String),

    /// 화면 캡처 실패
    #[error("캡처 에러: {0}")]
    Capture(String),

    /// 출력 창 표시 실패
    #[error("표시 에러: {0}")]
    Presentation(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field() {
        let err = CoreError::Validation {
            field: "sampling.chunk_size".to_string(),
            message: "0보다 커야 함".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sampling.chunk_size"));
        assert!(msg.contains("0보다 커야 함"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "model.onnx");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
