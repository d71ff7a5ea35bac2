//! # enhancer-app
//!
//! 창 캡처 → 청크 샘플링 → ONNX 향상 → 표시 루프의 조립 계층.
//!
//! - [`session::run`]: 기본 설정과 플랫폼 어댑터로 블로킹 실행
//! - [`session::run_with`]: 포트와 설정을 주입한 [`session::Session`]으로 실행
//!
//! 정상 종료(`STOPPED`, `WINDOW_LOST`)는 `Ok(RunOutcome)`,
//! 창 미발견/모델 로드 실패/치명적 에러는 [`error::RunError`].

pub mod capture_loop;
pub mod error;
pub mod lifecycle;
pub mod session;

pub use error::RunError;
pub use session::{run, run_with, Session};
