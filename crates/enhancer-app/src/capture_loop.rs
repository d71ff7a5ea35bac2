//! 캡처 루프.
//!
//! 상태: INIT → RUNNING → (STOPPED | WINDOW_LOST | FATAL_ERROR). 재개 없음.
//!
//! 한 반복:
//! 1. 창 생존 확인 (사라졌으면 WINDOW_LOST)
//! 2. 재확인 주기마다 영역 재조회, 허용 오차를 넘는 크기 변화면 출력 창 리사이즈
//! 3. 영역 크기 0 (최소화) → 대기 후 카운터 진행 없이 다음 반복
//! 4. 청크 경계 처리 후 향상 여부 결정
//! 5. 캡처
//! 6. 선택된 프레임이면 향상 (실패 시 원본 유지)
//! 7. 표시
//! 8. 프레임 카운터 진행
//! 9. FPS 보고
//! 10. 중지 요청 확인 (STOPPED)

use std::time::{Duration, Instant};

use chrono::Utc;
use enhancer_core::config::AppConfig;
use enhancer_core::models::region::{Region, WindowHandle};
use enhancer_core::models::session::{RunOutcome, RunStats, RunStatus};
use enhancer_core::ports::capture::FrameSource;
use enhancer_core::ports::presenter::Presenter;
use enhancer_core::ports::random::RandomSource;
use enhancer_core::ports::window::WindowLocator;
use enhancer_monitor::fps::FpsMeter;
use enhancer_monitor::geometry::{GeometryChange, GeometryTracker};
use enhancer_vision::enhancer::FrameEnhancer;
use enhancer_vision::sampler::ChunkSampler;
use tracing::{debug, error, info, warn};

use crate::error::RunError;

/// 루프가 소유하는 포트 묶음
pub struct LoopPorts {
    pub locator: Box<dyn WindowLocator>,
    pub frames: Box<dyn FrameSource>,
    pub presenter: Box<dyn Presenter>,
    pub random: Box<dyn RandomSource>,
}

/// 캡처 루프
pub struct CaptureLoop {
    handle: WindowHandle,
    locator: Box<dyn WindowLocator>,
    frames: Box<dyn FrameSource>,
    presenter: Box<dyn Presenter>,
    enhancer: FrameEnhancer,
    sampler: ChunkSampler,
    geometry: GeometryTracker,
    fps: FpsMeter,
    stats: RunStats,
    check_interval: u64,
    resize_tolerance: u32,
    minimized_backoff: Duration,
}

impl CaptureLoop {
    pub fn new(
        handle: WindowHandle,
        ports: LoopPorts,
        enhancer: FrameEnhancer,
        config: &AppConfig,
    ) -> Self {
        let check_interval = config.capture.geometry_check_interval;
        let resize_tolerance = config.capture.resize_tolerance_px;
        Self {
            handle,
            locator: ports.locator,
            frames: ports.frames,
            presenter: ports.presenter,
            enhancer,
            sampler: ChunkSampler::new(config.sampling.chunk_size, ports.random),
            geometry: GeometryTracker::new(Region::default(), check_interval, resize_tolerance),
            fps: FpsMeter::new(config.telemetry.report_interval(), Instant::now()),
            stats: RunStats::new(Utc::now()),
            check_interval,
            resize_tolerance,
            minimized_backoff: config.capture.minimized_backoff(),
        }
    }

    /// 루프 실행. 어떤 경로로 끝나든 출력 창을 해제한다.
    pub fn run(mut self) -> Result<RunOutcome, RunError> {
        let result = self.init_surface().and_then(|()| self.drive());
        self.presenter.close();
        self.stats.ended_at = Some(Utc::now());

        match result {
            Ok(status) => {
                info!(
                    "캡처 루프 종료: {:?} (표시 {} / 향상 {} / 향상 실패 {})",
                    status,
                    self.stats.frames_presented,
                    self.stats.frames_enhanced,
                    self.stats.enhancement_failures
                );
                Ok(RunOutcome {
                    status,
                    stats: self.stats,
                })
            }
            Err(e) => {
                error!("캡처 루프 중단: {e}");
                Err(e)
            }
        }
    }

    /// 시작 영역 조회 후 출력 창 생성 (최소화 상태면 복원 시 생성)
    fn init_surface(&mut self) -> Result<(), RunError> {
        let region = self.locator.region(&self.handle)?;
        self.geometry = GeometryTracker::new(region, self.check_interval, self.resize_tolerance);
        if !region.is_empty() {
            self.presenter.ensure_surface(&region)?;
        }
        info!(
            "캡처 시작: '{}' ({},{} {}x{})",
            self.handle.title, region.left, region.top, region.width, region.height
        );
        Ok(())
    }

    fn drive(&mut self) -> Result<RunStatus, RunError> {
        loop {
            if let Some(status) = self.step()? {
                return Ok(status);
            }
        }
    }

    /// 한 반복. 종료 상태가 정해지면 `Some` 반환.
    fn step(&mut self) -> Result<Option<RunStatus>, RunError> {
        if !self.locator.is_alive(&self.handle) {
            info!("추적 중인 창이 닫힘: '{}'", self.handle.title);
            return Ok(Some(RunStatus::WindowLost));
        }

        let counter = self.sampler.state().frame_counter;
        if self.geometry.is_check_due(counter) {
            if let Some(status) = self.refresh_geometry()? {
                return Ok(Some(status));
            }
        }

        let region = self.geometry.region();
        if region.is_empty() {
            self.stats.minimized_skips += 1;
            std::thread::sleep(self.minimized_backoff);
            return self.poll_cancel();
        }

        let selected = self.sampler.decide();
        let frame = self.frames.capture(&region)?;

        if selected {
            match self.enhancer.enhance(&frame) {
                Ok(enhanced) => {
                    self.stats.frames_enhanced += 1;
                    self.presenter.show(&enhanced)?;
                }
                Err(e) => {
                    warn!("향상 실패, 원본 표시: {e}");
                    self.stats.enhancement_failures += 1;
                    self.presenter.show(&frame)?;
                }
            }
        } else {
            self.presenter.show(&frame)?;
        }
        self.stats.frames_presented += 1;

        self.sampler.advance();
        self.fps.record_frame();
        if let Some(report) = self.fps.poll_and_report(Instant::now()) {
            self.stats.last_fps = Some(report.fps);
        }

        self.poll_cancel()
    }

    /// 영역 재조회 및 반영
    fn refresh_geometry(&mut self) -> Result<Option<RunStatus>, RunError> {
        let fresh = match self.locator.region(&self.handle) {
            Ok(region) => region,
            // 조회 도중 창이 닫히는 경우
            Err(e) if !self.locator.is_alive(&self.handle) => {
                debug!("영역 조회 중 창 손실: {e}");
                return Ok(Some(RunStatus::WindowLost));
            }
            Err(e) => return Err(e.into()),
        };

        if let GeometryChange::Resized(region) = self.geometry.update(fresh) {
            if !region.is_empty() {
                self.presenter.ensure_surface(&region)?;
                self.stats.surface_resizes += 1;
            }
        }
        Ok(None)
    }

    fn poll_cancel(&mut self) -> Result<Option<RunStatus>, RunError> {
        if self.presenter.poll_cancel()? {
            info!("사용자 중지 요청");
            return Ok(Some(RunStatus::Stopped));
        }
        Ok(None)
    }
}
