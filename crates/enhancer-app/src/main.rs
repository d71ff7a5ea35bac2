//! # simple-enhancer
//!
//! 지정한 창을 실시간 캡처해 청크마다 한 프레임을 ONNX 모델로 향상하고
//! 출력 창에 표시한다. Ctrl+C 또는 출력 창의 중지 키로 종료.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use enhancer_app::lifecycle::LifecycleManager;
use enhancer_app::session::{run_with, Session};
use enhancer_core::config::AppConfig;
use enhancer_core::config_manager::ConfigManager;
use enhancer_core::models::session::RunStatus;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Simple Enhancer
///
/// 창 하나를 캡처해 실시간으로 화질을 향상한다
#[derive(Parser, Debug)]
#[command(name = "simple-enhancer")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 대상 창 제목 (부분 문자열, 대소문자 무시)
    #[arg(long, short = 'w', default_value = "Calculator")]
    window_title: String,

    /// ONNX 모델 경로
    #[arg(long, short = 'm')]
    model: PathBuf,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 샘플링 난수 시드 (재현용)
    #[arg(long)]
    seed: Option<u64>,

    /// 출력 창 없이 실행
    #[arg(long)]
    headless: bool,

    /// 표시할 최대 프레임 수 (헤드리스 모드)
    #[arg(long)]
    max_frames: Option<u64>,

    /// 종료 시 실행 통계를 JSON으로 출력
    #[arg(long)]
    json: bool,
}

/// 설정 로드 (파일 → CLI 오버라이드)
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone())
            .with_context(|| format!("설정 로드 실패: {}", path.display()))?
            .get(),
        None => match ConfigManager::new() {
            Ok(manager) => {
                info!("설정 파일: {}", manager.config_path().display());
                manager.get()
            }
            Err(e) => {
                warn!("설정 파일 사용 불가, 기본값 사용: {e}");
                AppConfig::default_config()
            }
        },
    };

    if let Some(seed) = args.seed {
        config.sampling.seed = Some(seed);
    }
    if args.max_frames.is_some() {
        config.display.max_frames = args.max_frames;
    }
    config.validate().context("설정 검증 실패")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "simple_enhancer={0},enhancer_app={0},enhancer_core={0},enhancer_monitor={0},enhancer_vision={0},enhancer_display={0}",
        args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("Simple Enhancer 시작");
    let config = load_config(&args)?;

    let lifecycle = Arc::new(LifecycleManager::new());
    let session = Session::platform(config, Some(lifecycle.subscribe()), args.headless);

    let window_title = args.window_title.clone();
    let model_path = args.model.clone();
    let mut task =
        tokio::task::spawn_blocking(move || run_with(session, &window_title, &model_path));

    let joined = tokio::select! {
        joined = &mut task => joined,
        _ = lifecycle.wait_for_signal() => task.await,
    };

    let outcome = joined.context("캡처 루프 스레드 실패")??;
    match outcome.status {
        RunStatus::Stopped if lifecycle.is_shutdown_requested() => info!("시그널로 종료"),
        RunStatus::Stopped => info!("사용자 요청으로 종료"),
        RunStatus::WindowLost => info!("대상 창이 닫혀 종료"),
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.stats)?);
    }

    info!("Simple Enhancer 종료");
    Ok(())
}
