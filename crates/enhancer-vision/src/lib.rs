//! # enhancer-vision
//!
//! Edge 이미지 처리 크레이트.
//! 창 영역 캡처, 청크 단위 샘플링 결정, 프레임 ↔ 텐서 변환,
//! ONNX 모델 추론을 통한 프레임 향상을 담당한다.

pub mod capture;
pub mod enhancer;
pub mod onnx;
pub mod sampler;
pub mod tensor;
