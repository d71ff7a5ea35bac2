//! 세션 조립.
//!
//! 포트 구현을 주입받아 창 탐색 → 모델 로드 → 캡처 루프 순서로 실행한다.
//! 창을 못 찾으면 출력 창을 만들지 않고, 모델 로드 실패는 첫 캡처 전에 드러난다.

use std::path::Path;

use enhancer_core::config::AppConfig;
use enhancer_core::models::session::RunOutcome;
use enhancer_core::ports::capture::FrameSource;
use enhancer_core::ports::enhance::ModelLoader;
use enhancer_core::ports::presenter::Presenter;
use enhancer_core::ports::random::RandomSource;
use enhancer_core::ports::window::WindowLocator;
use enhancer_display::headless::HeadlessPresenter;
use enhancer_monitor::locator::XcapWindowLocator;
use enhancer_vision::capture::XcapFrameSource;
use enhancer_vision::enhancer::FrameEnhancer;
use enhancer_vision::onnx::OnnxModelLoader;
use enhancer_vision::sampler::StdRandomSource;
use tokio::sync::watch;
use tracing::info;

use crate::capture_loop::{CaptureLoop, LoopPorts};
use crate::error::RunError;

/// 실행 세션: 포트 묶음 + 설정
pub struct Session {
    config: AppConfig,
    locator: Box<dyn WindowLocator>,
    frames: Box<dyn FrameSource>,
    loader: Box<dyn ModelLoader>,
    presenter: Box<dyn Presenter>,
    random: Option<Box<dyn RandomSource>>,
}

impl Session {
    pub fn new(
        locator: Box<dyn WindowLocator>,
        frames: Box<dyn FrameSource>,
        loader: Box<dyn ModelLoader>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            config: AppConfig::default_config(),
            locator,
            frames,
            loader,
            presenter,
            random: None,
        }
    }

    /// 플랫폼 기본 어댑터로 세션 구성
    ///
    /// `headless`가 아니고 `highgui` feature가 켜져 있으면 OpenCV 창에 표시한다.
    pub fn platform(
        config: AppConfig,
        shutdown: Option<watch::Receiver<bool>>,
        headless: bool,
    ) -> Self {
        let presenter = platform_presenter(&config, shutdown, headless);
        Self::new(
            Box::new(XcapWindowLocator::new()),
            Box::new(XcapFrameSource::new()),
            Box::new(OnnxModelLoader::new(config.inference.plan_cache_capacity)),
            presenter,
        )
        .with_config(config)
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// 샘플링 난수 소스 지정 (기본: 설정 시드 또는 엔트로피)
    pub fn with_random(mut self, random: Box<dyn RandomSource>) -> Self {
        self.random = Some(random);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 세션 실행 (블로킹)
    pub fn run(self, window_title: &str, model_path: &Path) -> Result<RunOutcome, RunError> {
        self.config.validate()?;

        let handle = self.locator.find_window(window_title)?;
        info!("대상 창: '{}' (id {})", handle.title, handle.id);

        let enhancer = FrameEnhancer::load(self.loader.as_ref(), model_path)?;

        let random: Box<dyn RandomSource> = match self.random {
            Some(random) => random,
            None => Box::new(StdRandomSource::from_seed_option(self.config.sampling.seed)),
        };
        let ports = LoopPorts {
            locator: self.locator,
            frames: self.frames,
            presenter: self.presenter,
            random,
        };
        CaptureLoop::new(handle, ports, enhancer, &self.config).run()
    }
}

fn platform_presenter(
    config: &AppConfig,
    shutdown: Option<watch::Receiver<bool>>,
    headless: bool,
) -> Box<dyn Presenter> {
    #[cfg(feature = "highgui")]
    if !headless {
        let presenter = enhancer_display::highgui::HighGuiPresenter::new(
            config.display.window_name.clone(),
            config.display.cancel_key,
        );
        return Box::new(match shutdown {
            Some(rx) => presenter.with_shutdown(rx),
            None => presenter,
        });
    }

    #[cfg(not(feature = "highgui"))]
    if !headless {
        tracing::warn!("highgui feature 없이 빌드됨, 헤드리스로 실행");
    }

    let presenter = HeadlessPresenter::new().with_max_frames(config.display.max_frames);
    Box::new(match shutdown {
        Some(rx) => presenter.with_shutdown(rx),
        None => presenter,
    })
}

/// 주입된 세션으로 실행
pub fn run_with(
    session: Session,
    window_title: &str,
    model_path: &Path,
) -> Result<RunOutcome, RunError> {
    session.run(window_title, model_path)
}

/// 기본 설정과 플랫폼 어댑터로 실행
pub fn run(window_title: &str, model_path: &Path) -> Result<RunOutcome, RunError> {
    run_with(
        Session::platform(AppConfig::default_config(), None, false),
        window_title,
        model_path,
    )
}
