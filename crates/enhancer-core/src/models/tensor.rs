//! 모델 경계 텐서 모델.
//!
//! `1 × 3 × H × W` f32, RGB 채널, 값 범위 `[0, 1]`.
//! 모델 출력은 같은 랭크지만 `H′, W′`가 다를 수 있다 (업스케일).

use crate::error::CoreError;

/// 배치 크기 1, 3채널 NCHW f32 텐서
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    height: usize,
    width: usize,
    data: Vec<f32>,
}

impl Tensor {
    /// 채널 우선(RGB 평면 순) 데이터로 텐서 생성
    pub fn new(height: usize, width: usize, data: Vec<f32>) -> Result<Self, CoreError> {
        let expected = 3 * height * width;
        if data.len() != expected {
            return Err(CoreError::Enhancement(format!(
                "텐서 [1, 3, {height}, {width}]는 원소 {expected}개여야 하지만 {}개",
                data.len()
            )));
        }
        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// 임의 shape에서 텐서 생성: 모델 출력 검증용
    ///
    /// 랭크 4, 배치 1, 채널 3만 허용한다.
    pub fn from_shape(shape: &[usize], data: Vec<f32>) -> Result<Self, CoreError> {
        match shape {
            [1, 3, h, w] => Self::new(*h, *w, data),
            _ => Err(CoreError::Enhancement(format!(
                "지원하지 않는 출력 shape {shape:?} (기대: [1, 3, H, W])"
            ))),
        }
    }

    /// `[1, 3, H, W]`
    pub fn shape(&self) -> [usize; 4] {
        [1, 3, self.height, self.width]
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}
