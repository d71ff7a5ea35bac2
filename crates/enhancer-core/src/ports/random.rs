//! 난수 소스 포트.
//!
//! 샘플링 결정을 테스트에서 재현할 수 있도록 주입한다.
//! 구현: `enhancer-vision::sampler::StdRandomSource` (rand)

/// 균등 분포 정수 난수
pub trait RandomSource: Send {
    /// `0..upper` 범위의 균등 난수 (`upper > 0`)
    fn next_index(&mut self, upper: u64) -> u64;
}
