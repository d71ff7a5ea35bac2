//! 청크 샘플링 상태.

/// 청크 상태
///
/// `frame_counter`는 단조 증가하며 리셋되지 않는다. 청크 경계와
/// 지오메트리 재확인 주기 모두 이 카운터의 나머지로 판단한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkState {
    /// 청크 크기 (프레임 수)
    pub chunk_size: u64,
    /// 현재 청크에서 향상할 위치 (`0..chunk_size`)
    pub selected_index: u64,
    /// 누적 프레임 카운터
    pub frame_counter: u64,
}

impl ChunkState {
    pub fn new(chunk_size: u64) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            selected_index: 0,
            frame_counter: 0,
        }
    }

    /// 청크 내 현재 위치
    pub fn position(&self) -> u64 {
        self.frame_counter % self.chunk_size
    }

    /// 새 청크의 첫 프레임인지
    pub fn is_chunk_boundary(&self) -> bool {
        self.position() == 0
    }

    /// 현재 프레임이 향상 대상인지
    pub fn should_enhance(&self) -> bool {
        self.position() == self.selected_index
    }

    /// 프레임 하나 진행
    pub fn advance(&mut self) {
        self.frame_counter += 1;
    }
}
