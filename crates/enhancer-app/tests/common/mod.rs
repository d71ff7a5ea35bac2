//! 시나리오 테스트용 포트 가짜 구현.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use enhancer_app::Session;
use enhancer_core::config::AppConfig;
use enhancer_core::error::CoreError;
use enhancer_core::models::frame::Frame;
use enhancer_core::models::region::{Region, WindowHandle};
use enhancer_core::models::tensor::Tensor;
use enhancer_core::ports::capture::FrameSource;
use enhancer_core::ports::enhance::{InferenceModel, ModelLoader};
use enhancer_core::ports::presenter::Presenter;
use enhancer_core::ports::random::RandomSource;
use enhancer_core::ports::window::WindowLocator;
use parking_lot::Mutex;

// ── 창 탐색기 ──────────────────────────────────────────

/// 창 탐색기 스크립트
#[derive(Debug, Default)]
pub struct LocatorScript {
    /// `is_alive`가 true를 돌려줄 횟수 (None이면 항상 true)
    pub alive_calls: Option<u64>,
    /// `region` 호출마다 앞에서부터 꺼냄 (마지막 값은 유지)
    pub regions: VecDeque<Region>,
    pub region_calls: u64,
    pub alive_checks: u64,
    /// n번째 `region` 호출(1부터)에서 실패
    pub region_error_at: Option<u64>,
}

pub struct FakeLocator {
    windows: Vec<WindowHandle>,
    script: Arc<Mutex<LocatorScript>>,
}

impl FakeLocator {
    pub fn new(titles: &[&str], regions: Vec<Region>) -> (Self, Arc<Mutex<LocatorScript>>) {
        let script = Arc::new(Mutex::new(LocatorScript {
            regions: regions.into(),
            ..LocatorScript::default()
        }));
        let windows = titles
            .iter()
            .enumerate()
            .map(|(i, t)| WindowHandle::new(i as u32 + 1, *t))
            .collect();
        (
            Self {
                windows,
                script: Arc::clone(&script),
            },
            script,
        )
    }
}

impl WindowLocator for FakeLocator {
    fn find_window(&self, title_substring: &str) -> Result<WindowHandle, CoreError> {
        let needle = title_substring.to_lowercase();
        self.windows
            .iter()
            .find(|w| !needle.is_empty() && w.title.to_lowercase().contains(&needle))
            .cloned()
            .ok_or_else(|| CoreError::WindowNotFound(title_substring.to_string()))
    }

    fn is_alive(&self, _handle: &WindowHandle) -> bool {
        let mut script = self.script.lock();
        script.alive_checks += 1;
        match script.alive_calls {
            None => true,
            Some(0) => false,
            Some(n) => {
                script.alive_calls = Some(n - 1);
                true
            }
        }
    }

    fn region(&self, _handle: &WindowHandle) -> Result<Region, CoreError> {
        let mut script = self.script.lock();
        script.region_calls += 1;
        if script.region_error_at == Some(script.region_calls) {
            return Err(CoreError::Capture("창 속성 조회 실패".to_string()));
        }
        let region = if script.regions.len() > 1 {
            script.regions.pop_front()
        } else {
            script.regions.front().copied()
        };
        region.ok_or_else(|| CoreError::Capture("영역 없음".to_string()))
    }
}

// ── 프레임 소스 ────────────────────────────────────────

/// 호출 순번이 픽셀값에 들어간 프레임을 만든다
pub struct FakeFrameSource {
    captured: Arc<Mutex<Vec<Region>>>,
    fail_at: Option<usize>,
}

impl FakeFrameSource {
    pub fn new() -> (Self, Arc<Mutex<Vec<Region>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                captured: Arc::clone(&captured),
                fail_at: None,
            },
            captured,
        )
    }

    /// n번째 캡처(0부터)에서 실패
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }
}

impl FrameSource for FakeFrameSource {
    fn capture(&mut self, region: &Region) -> Result<Frame, CoreError> {
        let mut captured = self.captured.lock();
        if self.fail_at == Some(captured.len()) {
            return Err(CoreError::Capture("모니터 분리".to_string()));
        }
        let seq = captured.len();
        captured.push(*region);
        Ok(fake_frame(region, seq))
    }
}

/// `FakeFrameSource`가 `seq`번째 캡처에서 돌려주는 프레임
pub fn fake_frame(region: &Region, seq: usize) -> Frame {
    let seq = seq as u8;
    let data = (0..region.width as usize * region.height as usize * 3)
        .map(|i| (i as u8).wrapping_mul(7).wrapping_add(seq.wrapping_mul(13)))
        .collect();
    Frame::from_bgr(region.width, region.height, data).unwrap()
}

// ── 모델 ───────────────────────────────────────────────

pub struct IdentityModel;

impl InferenceModel for IdentityModel {
    fn infer(&mut self, input: &Tensor) -> Result<Tensor, CoreError> {
        Ok(input.clone())
    }
}

/// 1 - x
pub struct InvertModel;

impl InferenceModel for InvertModel {
    fn infer(&mut self, input: &Tensor) -> Result<Tensor, CoreError> {
        let data = input.data().iter().map(|v| 1.0 - v).collect();
        Tensor::new(input.height(), input.width(), data)
    }
}

pub struct FailingModel;

impl InferenceModel for FailingModel {
    fn infer(&mut self, _input: &Tensor) -> Result<Tensor, CoreError> {
        Err(CoreError::Enhancement("세션 실행 실패".to_string()))
    }
}

type ModelFactory = Box<dyn Fn() -> Box<dyn InferenceModel> + Send>;

pub struct FakeLoader {
    factory: ModelFactory,
}

impl FakeLoader {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn InferenceModel> + Send + 'static,
    {
        Self {
            factory: Box::new(factory),
        }
    }

    pub fn identity() -> Self {
        Self::new(|| Box::new(IdentityModel))
    }
}

impl ModelLoader for FakeLoader {
    fn load(&self, _path: &Path) -> Result<Box<dyn InferenceModel>, CoreError> {
        Ok((self.factory)())
    }
}

// ── 출력 창 ────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct PresenterLog {
    pub surfaces: Vec<Region>,
    pub shown: Vec<Frame>,
    pub cancel_polls: u64,
    pub closed: bool,
}

pub struct RecordingPresenter {
    log: Arc<Mutex<PresenterLog>>,
    cancel_after: Option<usize>,
}

impl RecordingPresenter {
    /// `cancel_after`개 프레임을 표시한 뒤 중지 요청
    pub fn new(cancel_after: Option<usize>) -> (Self, Arc<Mutex<PresenterLog>>) {
        let log = Arc::new(Mutex::new(PresenterLog::default()));
        (
            Self {
                log: Arc::clone(&log),
                cancel_after,
            },
            log,
        )
    }
}

impl Presenter for RecordingPresenter {
    fn ensure_surface(&mut self, region: &Region) -> Result<(), CoreError> {
        self.log.lock().surfaces.push(*region);
        Ok(())
    }

    fn show(&mut self, frame: &Frame) -> Result<(), CoreError> {
        self.log.lock().shown.push(frame.clone());
        Ok(())
    }

    fn poll_cancel(&mut self) -> Result<bool, CoreError> {
        let mut log = self.log.lock();
        log.cancel_polls += 1;
        Ok(self.cancel_after.is_some_and(|n| log.shown.len() >= n))
    }

    fn close(&mut self) {
        self.log.lock().closed = true;
    }
}

// ── 난수 ───────────────────────────────────────────────

/// 항상 같은 위치를 고른다
pub struct FixedRandom(pub u64);

impl RandomSource for FixedRandom {
    fn next_index(&mut self, upper: u64) -> u64 {
        self.0 % upper
    }
}

// ── 조립 ───────────────────────────────────────────────

/// 대기 없는 테스트 설정
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default_config();
    config.capture.minimized_backoff_ms = 0;
    config
}

pub fn region(width: u32, height: u32) -> Region {
    Region::new(100, 100, width, height)
}

pub struct Harness {
    pub locator: Arc<Mutex<LocatorScript>>,
    pub captured: Arc<Mutex<Vec<Region>>>,
    pub presenter: Arc<Mutex<PresenterLog>>,
}

/// 가짜 포트로 세션 구성
pub fn session(
    titles: &[&str],
    regions: Vec<Region>,
    loader: Box<dyn ModelLoader>,
    cancel_after: Option<usize>,
) -> (Session, Harness) {
    let (locator, locator_script) = FakeLocator::new(titles, regions);
    let (frames, captured) = FakeFrameSource::new();
    let (presenter, presenter_log) = RecordingPresenter::new(cancel_after);
    let session = Session::new(
        Box::new(locator),
        Box::new(frames),
        loader,
        Box::new(presenter),
    )
    .with_config(test_config())
    .with_random(Box::new(FixedRandom(0)));
    (
        session,
        Harness {
            locator: locator_script,
            captured,
            presenter: presenter_log,
        },
    )
}
