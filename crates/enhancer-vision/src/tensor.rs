//! 프레임 ↔ 텐서 변환.
//!
//! - 전처리: BGR u8 `[H, W, 3]` → RGB f32 `[1, 3, H, W]`, `[0, 1]` 정규화
//! - 후처리: `[1, 3, H′, W′]` → `[0, 1]` 클리핑 → ×255 반올림 → u8 → HWC → BGR

use enhancer_core::error::CoreError;
use enhancer_core::models::frame::{Frame, CHANNELS};
use enhancer_core::models::tensor::Tensor;

/// BGR 바이트 오프셋 → RGB 평면 인덱스 (B=0 → 평면 2, R=2 → 평면 0)
const BGR_TO_RGB_PLANE: [usize; 3] = [2, 1, 0];

/// 전처리: BGR 프레임 → RGB NCHW 텐서
pub fn frame_to_tensor(frame: &Frame) -> Result<Tensor, CoreError> {
    let (w, h) = (frame.width() as usize, frame.height() as usize);
    let plane = w * h;
    let mut data = vec![0.0f32; CHANNELS * plane];

    for (i, px) in frame.data().chunks_exact(CHANNELS).enumerate() {
        for (c, &value) in px.iter().enumerate() {
            data[BGR_TO_RGB_PLANE[c] * plane + i] = value as f32 / 255.0;
        }
    }

    Tensor::new(h, w, data)
}

/// 후처리: RGB NCHW 텐서 → BGR 프레임
pub fn tensor_to_frame(tensor: &Tensor) -> Result<Frame, CoreError> {
    let (h, w) = (tensor.height(), tensor.width());
    let plane = w * h;
    let src = tensor.data();

    let width = u32::try_from(w)
        .map_err(|_| CoreError::Enhancement(format!("출력 너비가 너무 큼: {w}")))?;
    let height = u32::try_from(h)
        .map_err(|_| CoreError::Enhancement(format!("출력 높이가 너무 큼: {h}")))?;

    let mut data = Vec::with_capacity(plane * CHANNELS);
    for i in 0..plane {
        for plane_index in BGR_TO_RGB_PLANE {
            data.push(quantize(src[plane_index * plane + i]));
        }
    }

    Frame::from_bgr(width, height, data)
}

/// `[0, 1]` 클리핑 후 8비트 양자화 (NaN은 0)
#[inline]
pub fn quantize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
