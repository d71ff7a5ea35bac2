//! 실행 에러.
//!
//! 어댑터가 돌려주는 `CoreError`를 외부 호출자가 구분해야 하는
//! 세 가지 분류로 묶는다. 창 손실과 사용자 중지는 에러가 아니다.

use enhancer_core::error::CoreError;
use thiserror::Error;

/// `run` 실패 분류
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    /// 제목과 일치하는 창 없음 (루프 시작 전)
    #[error("창을 찾을 수 없음: '{0}'")]
    NotFound(String),

    /// 모델 로드 실패 (루프 시작 전)
    #[error("모델 로드 실패: {0}")]
    LoadError(String),

    /// 캡처/표시 등 복구 불가 실패
    #[error("치명적 에러: {0}")]
    FatalError(String),
}

impl From<CoreError> for RunError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::WindowNotFound(title) => Self::NotFound(title),
            CoreError::ModelLoad(message) => Self::LoadError(message),
            other => Self::FatalError(other.to_string()),
        }
    }
}
