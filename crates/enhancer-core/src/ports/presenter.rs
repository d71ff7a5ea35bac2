//! 출력 표시 포트.
//!
//! 구현: `enhancer-display` crate (헤드리스, OpenCV HighGUI)

use crate::error::CoreError;
use crate::models::frame::Frame;
use crate::models::region::Region;

/// 출력 창
pub trait Presenter: Send {
    /// 출력 창을 `region` 크기로 생성/리사이즈. 이미 같은 크기면 no-op.
    fn ensure_surface(&mut self, region: &Region) -> Result<(), CoreError>;

    /// 프레임 즉시 표시
    fn show(&mut self, frame: &Frame) -> Result<(), CoreError>;

    /// 사용자 중지 요청 여부 (논블로킹)
    fn poll_cancel(&mut self) -> Result<bool, CoreError>;

    /// 출력 창 해제 (실행 종료 시)
    fn close(&mut self);
}
