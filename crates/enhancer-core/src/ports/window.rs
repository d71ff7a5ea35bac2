//! 창 탐색 포트.
//!
//! 구현: `enhancer-monitor` crate (xcap + Win32 FFI)

use crate::error::CoreError;
use crate::models::region::{Region, WindowHandle};

/// 창 탐색기: 제목으로 창을 찾고 생존/지오메트리를 재확인
///
/// 창은 외부에서 닫히거나 움직이므로 결과를 캐시하지 않는다.
pub trait WindowLocator: Send {
    /// 보이는 최상위 창 중 제목에 `title_substring`이 (대소문자 무시) 포함된 첫 창.
    ///
    /// 열거 순서는 플랫폼이 정하며 안정적이지 않다. 없으면 `CoreError::WindowNotFound`.
    fn find_window(&self, title_substring: &str) -> Result<WindowHandle, CoreError>;

    /// 창이 아직 존재하고 보이는지 (매 반복 호출해도 되는 비용)
    fn is_alive(&self, handle: &WindowHandle) -> bool;

    /// 현재 화면 좌표계 영역
    fn region(&self, handle: &WindowHandle) -> Result<Region, CoreError>;
}
