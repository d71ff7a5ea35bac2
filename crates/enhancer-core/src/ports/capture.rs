//! 프레임 소스 포트.
//!
//! 구현: `enhancer-vision` crate (xcap)

use crate::error::CoreError;
use crate::models::frame::Frame;
use crate::models::region::Region;

/// 화면 영역 캡처
pub trait FrameSource: Send {
    /// `region`의 현재 화면 내용을 BGR 프레임으로 캡처 (알파 제거).
    ///
    /// 호출자는 면적 0인 영역을 넘기지 않는다.
    fn capture(&mut self, region: &Region) -> Result<Frame, CoreError>;
}
