//! OpenCV HighGUI 출력 어댑터.
//!
//! 이름 있는 창 하나에 BGR 프레임을 그대로 표시한다.
//! HighGUI 창은 만든 스레드에서만 다뤄야 하므로 창 생성은
//! 생성자가 아니라 첫 `ensure_surface` 호출(캡처 루프 스레드)에서 한다.

use enhancer_core::error::CoreError;
use enhancer_core::models::frame::Frame;
use enhancer_core::models::region::Region;
use enhancer_core::ports::presenter::Presenter;
use opencv::core::{Mat, Scalar, CV_8UC3};
use opencv::highgui;
use opencv::prelude::*;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::shutdown_requested;

fn presentation_err(what: &str, e: opencv::Error) -> CoreError {
    CoreError::Presentation(format!("{what}: {e}"))
}

/// OpenCV 창: `Presenter` 포트 구현
pub struct HighGuiPresenter {
    window_name: String,
    cancel_key: char,
    shutdown: Option<watch::Receiver<bool>>,
    /// 생성된 창 크기 (None이면 아직 창 없음)
    size: Option<(u32, u32)>,
    /// 표시 버퍼 (프레임 크기가 같으면 재사용)
    canvas: Mat,
}

impl HighGuiPresenter {
    pub fn new(window_name: impl Into<String>, cancel_key: char) -> Self {
        Self {
            window_name: window_name.into(),
            cancel_key: cancel_key.to_ascii_lowercase(),
            shutdown: None,
            size: None,
            canvas: Mat::default(),
        }
    }

    /// 종료 신호 수신기 연결
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// 프레임 크기에 맞는 표시 버퍼 준비 후 BGR 바이트 복사
    fn fill_canvas(&mut self, frame: &Frame) -> Result<(), CoreError> {
        let rows = frame.height() as i32;
        let cols = frame.width() as i32;
        if self.canvas.rows() != rows || self.canvas.cols() != cols {
            self.canvas =
                Mat::new_rows_cols_with_default(rows, cols, CV_8UC3, Scalar::all(0.0))
                    .map_err(|e| presentation_err("표시 버퍼 생성 실패", e))?;
        }
        let bytes = self
            .canvas
            .data_bytes_mut()
            .map_err(|e| presentation_err("표시 버퍼 접근 실패", e))?;
        if bytes.len() != frame.data().len() {
            return Err(CoreError::Presentation(format!(
                "표시 버퍼 크기 불일치: {} != {}",
                bytes.len(),
                frame.data().len()
            )));
        }
        bytes.copy_from_slice(frame.data());
        Ok(())
    }
}

impl Presenter for HighGuiPresenter {
    fn ensure_surface(&mut self, region: &Region) -> Result<(), CoreError> {
        let size = (region.width, region.height);
        if self.size == Some(size) {
            return Ok(());
        }
        if self.size.is_none() {
            highgui::named_window(&self.window_name, highgui::WINDOW_NORMAL)
                .map_err(|e| presentation_err("출력 창 생성 실패", e))?;
            info!("출력 창 생성: '{}' {}x{}", self.window_name, size.0, size.1);
        } else {
            debug!("출력 창 리사이즈: {}x{}", size.0, size.1);
        }
        highgui::resize_window(&self.window_name, size.0 as i32, size.1 as i32)
            .map_err(|e| presentation_err("출력 창 리사이즈 실패", e))?;
        self.size = Some(size);
        Ok(())
    }

    fn show(&mut self, frame: &Frame) -> Result<(), CoreError> {
        self.fill_canvas(frame)?;
        highgui::imshow(&self.window_name, &self.canvas)
            .map_err(|e| presentation_err("프레임 표시 실패", e))
    }

    fn poll_cancel(&mut self) -> Result<bool, CoreError> {
        if shutdown_requested(&self.shutdown) {
            return Ok(true);
        }
        // wait_key는 이벤트 펌프 역할도 한다 (최소 1ms)
        let key = highgui::wait_key(1).map_err(|e| presentation_err("키 입력 확인 실패", e))?;
        if key >= 0 {
            let pressed = char::from((key & 0xff) as u8).to_ascii_lowercase();
            if pressed == self.cancel_key {
                info!("중지 키 입력: '{}'", self.cancel_key);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn close(&mut self) {
        if self.size.take().is_some() {
            if let Err(e) = highgui::destroy_window(&self.window_name) {
                warn!("출력 창 해제 실패: {e}");
            }
        }
    }
}

impl Drop for HighGuiPresenter {
    fn drop(&mut self) {
        self.close();
    }
}
