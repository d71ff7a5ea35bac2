//! 프레임 향상 엔진.
//!
//! 전처리 → 모델 추론 → 후처리를 한 번에 수행한다.
//! 같은 모델과 같은 입력에는 항상 같은 출력을 낸다.
//! 실패 시 원본 프레임으로 대체하는 정책은 호출 측(캡처 루프)이 담당한다.

use std::path::Path;

use enhancer_core::error::CoreError;
use enhancer_core::models::frame::Frame;
use enhancer_core::ports::enhance::{InferenceModel, ModelLoader};
use tracing::{debug, info};

use crate::tensor::{frame_to_tensor, tensor_to_frame};

/// 프레임 향상기
pub struct FrameEnhancer {
    model: Box<dyn InferenceModel>,
}

impl FrameEnhancer {
    pub fn new(model: Box<dyn InferenceModel>) -> Self {
        Self { model }
    }

    /// 로더로 모델 파일을 읽어 향상기 생성
    pub fn load(loader: &dyn ModelLoader, path: &Path) -> Result<Self, CoreError> {
        let model = loader.load(path)?;
        info!("모델 로드 완료: {}", path.display());
        Ok(Self::new(model))
    }

    /// 프레임 향상: 출력 해상도는 입력과 다를 수 있다
    pub fn enhance(&mut self, frame: &Frame) -> Result<Frame, CoreError> {
        let input = frame_to_tensor(frame)?;
        let output = self.model.infer(&input)?;
        let enhanced = tensor_to_frame(&output)?;
        debug!(
            "향상 완료: {}x{} → {}x{}",
            frame.width(),
            frame.height(),
            enhanced.width(),
            enhanced.height()
        );
        Ok(enhanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enhancer_core::models::tensor::Tensor;

    /// 출력 = 입력
    struct Identity;

    impl InferenceModel for Identity {
        fn infer(&mut self, input: &Tensor) -> Result<Tensor, CoreError> {
            Ok(input.clone())
        }
    }

    /// 최근접 2배 업스케일
    struct Upscale2x;

    impl InferenceModel for Upscale2x {
        fn infer(&mut self, input: &Tensor) -> Result<Tensor, CoreError> {
            let (h, w) = (input.height(), input.width());
            let (oh, ow) = (h * 2, w * 2);
            let src = input.data();
            let mut out = Vec::with_capacity(3 * oh * ow);
            for c in 0..3 {
                for y in 0..oh {
                    for x in 0..ow {
                        out.push(src[c * h * w + (y / 2) * w + x / 2]);
                    }
                }
            }
            Tensor::new(oh, ow, out)
        }
    }

    /// 값을 과도하게 키워 범위를 벗어나게 함
    struct Overshoot;

    impl InferenceModel for Overshoot {
        fn infer(&mut self, input: &Tensor) -> Result<Tensor, CoreError> {
            let data = input.data().iter().map(|v| v * 4.0 - 1.0).collect();
            Tensor::new(input.height(), input.width(), data)
        }
    }

    struct Failing;

    impl InferenceModel for Failing {
        fn infer(&mut self, _input: &Tensor) -> Result<Tensor, CoreError> {
            Err(CoreError::Enhancement("추론 실패".to_string()))
        }
    }

    fn sample_frame() -> Frame {
        let data = (0..4 * 3 * 3).map(|i| (i * 29 % 256) as u8).collect();
        Frame::from_bgr(4, 3, data).unwrap()
    }

    #[test]
    fn identity_model_reproduces_frame() {
        let frame = sample_frame();
        let mut enhancer = FrameEnhancer::new(Box::new(Identity));
        let out = enhancer.enhance(&frame).unwrap();
        assert_eq!((out.width(), out.height()), (4, 3));
        for (a, b) in out.data().iter().zip(frame.data()) {
            assert!((*a as i16 - *b as i16).abs() <= 1);
        }
    }

    #[test]
    fn enhance_is_deterministic() {
        let frame = sample_frame();
        let mut enhancer = FrameEnhancer::new(Box::new(Overshoot));
        let first = enhancer.enhance(&frame).unwrap();
        let second = enhancer.enhance(&frame).unwrap();
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn upscaling_changes_resolution_and_keeps_colors() {
        let frame = sample_frame();
        let mut enhancer = FrameEnhancer::new(Box::new(Upscale2x));
        let out = enhancer.enhance(&frame).unwrap();
        assert_eq!((out.width(), out.height()), (8, 6));
        assert_eq!(out.pixel(3, 5), frame.pixel(1, 2));
    }

    #[test]
    fn overshoot_is_clipped() {
        let frame = Frame::from_bgr(1, 1, vec![0, 255, 128]).unwrap();
        let mut enhancer = FrameEnhancer::new(Box::new(Overshoot));
        let out = enhancer.enhance(&frame).unwrap();
        // 0 → -1 → 0, 255 → 3 → 255, 128 → ~1.0 → 255
        assert_eq!(out.data(), &[0, 255, 255]);
    }

    #[test]
    fn model_error_surfaces() {
        let mut enhancer = FrameEnhancer::new(Box::new(Failing));
        assert!(matches!(
            enhancer.enhance(&sample_frame()),
            Err(CoreError::Enhancement(_))
        ));
    }
}
