//! 추론 모델 포트.
//!
//! 구현: `enhancer-vision` crate (tract-onnx)

use std::path::Path;

use crate::error::CoreError;
use crate::models::tensor::Tensor;

/// 로드된 이미지-대-이미지 모델
///
/// 첫 번째 입력에 텐서를 넣고 첫 번째 출력을 돌려준다.
/// 같은 입력에는 같은 출력을 내야 한다 (숨은 난수 없음).
pub trait InferenceModel: Send {
    fn infer(&mut self, input: &Tensor) -> Result<Tensor, CoreError>;
}

/// 모델 로더
pub trait ModelLoader: Send {
    /// 파일 경로에서 추론 가능한 모델 로드.
    ///
    /// 파일 없음, 손상, 미지원 포맷은 `CoreError::ModelLoad`.
    fn load(&self, path: &Path) -> Result<Box<dyn InferenceModel>, CoreError>;
}
