//! 프레임(래스터) 모델.
//!
//! 캡처 → 향상 → 표시 경계를 오가는 `높이 × 너비 × 3` 8비트 래스터.
//! 채널 순서는 캡처/표시 호환을 위해 BGR로 고정한다.

use crate::error::CoreError;

/// 채널 수 (B, G, R)
pub const CHANNELS: usize = 3;

/// BGR 8비트 프레임
///
/// 반복마다 새로 만들어지고 그 반복 안에서 소비된다.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// 행 우선 BGR 바이트로 프레임 생성
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(CoreError::Validation {
                field: "frame.data".to_string(),
                message: format!(
                    "{}x{} BGR 프레임은 {} 바이트여야 하지만 {} 바이트",
                    width,
                    height,
                    expected,
                    data.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// RGBA 바이트에서 알파를 버리고 BGR 프레임 생성
    pub fn from_rgba(width: u32, height: u32, src: &[u8]) -> Result<Self, CoreError> {
        let pixels = width as usize * height as usize;
        if src.len() != pixels * 4 {
            return Err(CoreError::Validation {
                field: "frame.data".to_string(),
                message: format!(
                    "{}x{} RGBA 입력은 {} 바이트여야 하지만 {} 바이트",
                    width,
                    height,
                    pixels * 4,
                    src.len()
                ),
            });
        }
        let mut data = Vec::with_capacity(pixels * CHANNELS);
        for px in src.chunks_exact(4) {
            data.extend_from_slice(&[px[2], px[1], px[0]]);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// 검은 프레임
    pub fn black(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 행 우선 BGR 바이트
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// (x, y) 픽셀의 BGR 값
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}
