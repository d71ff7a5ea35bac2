//! 청크 샘플링 스케줄러.
//!
//! 고정 크기 청크마다 정확히 한 프레임을 향상 대상으로 고른다.
//! 선택 위치는 청크가 시작될 때마다 균등 난수로 다시 뽑아
//! 고정 오프셋이 만드는 주기적 끊김을 피한다. 픽셀 내용은 보지 않는다.

use enhancer_core::models::sampling::ChunkState;
use enhancer_core::ports::random::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// `rand::StdRng` 기반 난수 소스: `RandomSource` 포트 구현
pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    /// OS 엔트로피로 시드
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// 고정 시드 (재현 가능한 샘플링)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 설정의 선택적 시드로 생성
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for StdRandomSource {
    fn next_index(&mut self, upper: u64) -> u64 {
        self.rng.gen_range(0..upper.max(1))
    }
}

/// 청크 샘플러
pub struct ChunkSampler {
    state: ChunkState,
    random: Box<dyn RandomSource>,
}

impl ChunkSampler {
    pub fn new(chunk_size: u64, random: Box<dyn RandomSource>) -> Self {
        Self {
            state: ChunkState::new(chunk_size),
            random,
        }
    }

    pub fn state(&self) -> ChunkState {
        self.state
    }

    /// 청크 경계면 새 선택 위치를 뽑는다
    pub fn on_chunk_boundary(&mut self) {
        if self.state.is_chunk_boundary() {
            self.state.selected_index = self.random.next_index(self.state.chunk_size);
            trace!(
                "새 청크 @{}: 선택 위치 {}",
                self.state.frame_counter,
                self.state.selected_index
            );
        }
    }

    pub fn should_enhance(&self) -> bool {
        self.state.should_enhance()
    }

    /// 현재 프레임에 대한 결정: 경계 처리 후 향상 여부
    pub fn decide(&mut self) -> bool {
        self.on_chunk_boundary();
        self.should_enhance()
    }

    /// 프레임 표시 후 카운터 진행
    pub fn advance(&mut self) {
        self.state.advance();
    }
}
