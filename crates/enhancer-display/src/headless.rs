//! 헤드리스 출력 어댑터.
//!
//! 실제 창을 만들지 않고 출력 창 크기와 표시 프레임 수만 추적한다.
//! CI, 원격 세션, 벤치 실행에서 사용. 종료 신호 또는 프레임 상한에서 중지한다.

use std::sync::Arc;

use enhancer_core::error::CoreError;
use enhancer_core::models::frame::Frame;
use enhancer_core::models::region::Region;
use enhancer_core::ports::presenter::Presenter;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::shutdown_requested;

/// 헤드리스 표시 통계 (테스트/호출 측과 공유)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    /// 현재 출력 창 크기 (width, height)
    pub size: Option<(u32, u32)>,
    /// 실제 생성/리사이즈 횟수
    pub surface_changes: u64,
    /// 표시한 프레임 수
    pub frames_shown: u64,
    /// 마지막 표시 프레임 크기
    pub last_frame_size: Option<(u32, u32)>,
    /// close 호출 여부
    pub closed: bool,
}

/// 헤드리스 출력 창: `Presenter` 포트 구현
pub struct HeadlessPresenter {
    stats: Arc<Mutex<SurfaceStats>>,
    shutdown: Option<watch::Receiver<bool>>,
    max_frames: Option<u64>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(Mutex::new(SurfaceStats::default())),
            shutdown: None,
            max_frames: None,
        }
    }

    /// 종료 신호 수신기 연결
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// 표시 프레임 상한 (도달 시 `poll_cancel`이 true)
    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// 통계 공유 핸들
    pub fn stats_handle(&self) -> Arc<Mutex<SurfaceStats>> {
        Arc::clone(&self.stats)
    }
}

impl Default for HeadlessPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Presenter for HeadlessPresenter {
    fn ensure_surface(&mut self, region: &Region) -> Result<(), CoreError> {
        let size = (region.width, region.height);
        let mut stats = self.stats.lock();
        if stats.size == Some(size) {
            return Ok(());
        }
        debug!("헤드리스 출력 창: {}x{}", size.0, size.1);
        stats.size = Some(size);
        stats.surface_changes += 1;
        Ok(())
    }

    fn show(&mut self, frame: &Frame) -> Result<(), CoreError> {
        let mut stats = self.stats.lock();
        if stats.closed {
            return Err(CoreError::Presentation("닫힌 출력 창에 표시 시도".to_string()));
        }
        stats.frames_shown += 1;
        stats.last_frame_size = Some((frame.width(), frame.height()));
        Ok(())
    }

    fn poll_cancel(&mut self) -> Result<bool, CoreError> {
        if shutdown_requested(&self.shutdown) {
            return Ok(true);
        }
        if let Some(limit) = self.max_frames {
            if self.stats.lock().frames_shown >= limit {
                info!("프레임 상한 도달: {limit}");
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn close(&mut self) {
        let mut stats = self.stats.lock();
        if !stats.closed {
            debug!("헤드리스 출력 창 해제 ({}프레임 표시)", stats.frames_shown);
            stats.closed = true;
        }
    }
}
