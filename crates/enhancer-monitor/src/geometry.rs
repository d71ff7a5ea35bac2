//! 창 지오메트리 추적기.
//!
//! 캡처 루프가 소유하는 단일 권위 영역을 관리한다.
//! 주기적으로 새 영역을 받아 크기가 허용 오차를 넘게 바뀌었을 때만
//! 리사이즈로 판정한다 (OS 반올림 잡음으로 인한 출력 창 깜빡임 방지).

use enhancer_core::models::region::Region;
use tracing::{debug, info};

/// 지오메트리 갱신 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryChange {
    /// 변화 없음
    Unchanged,
    /// 크기는 허용 오차 이내, 위치만 이동
    Moved(Region),
    /// 허용 오차를 넘는 크기 변화: 출력 창 리사이즈 필요
    Resized(Region),
}

/// 지오메트리 추적기
#[derive(Debug, Clone)]
pub struct GeometryTracker {
    /// 현재 권위 영역
    current: Region,
    /// 재확인 주기 (프레임 수)
    check_interval: u64,
    /// 크기 변화 허용 오차 (픽셀)
    tolerance: u32,
}

impl GeometryTracker {
    pub fn new(initial: Region, check_interval: u64, tolerance: u32) -> Self {
        Self {
            current: initial,
            check_interval: check_interval.max(1),
            tolerance,
        }
    }

    /// 현재 권위 영역
    pub fn region(&self) -> Region {
        self.current
    }

    /// 이 프레임에서 지오메트리를 재확인해야 하는지
    pub fn is_check_due(&self, frame_counter: u64) -> bool {
        frame_counter % self.check_interval == 0
    }

    /// 새로 조회한 영역 반영
    ///
    /// 최소화/복원(크기 0 ↔ 0 아님) 전환은 허용 오차와 무관하게 리사이즈다.
    pub fn update(&mut self, fresh: Region) -> GeometryChange {
        let visibility_changed = self.current.is_empty() != fresh.is_empty();
        if visibility_changed || self.current.size_differs(&fresh, self.tolerance) {
            info!(
                "창 크기 변경: {}x{} → {}x{}",
                self.current.width, self.current.height, fresh.width, fresh.height
            );
            self.current = fresh;
            return GeometryChange::Resized(fresh);
        }

        if (fresh.left, fresh.top) != (self.current.left, self.current.top) {
            debug!(
                "창 이동: ({},{}) → ({},{})",
                self.current.left, self.current.top, fresh.left, fresh.top
            );
            self.current = self.current.moved_to(fresh.left, fresh.top);
            return GeometryChange::Moved(self.current);
        }

        GeometryChange::Unchanged
    }
}
