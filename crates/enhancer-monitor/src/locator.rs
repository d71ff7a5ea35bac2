//! 창 탐색기.
//!
//! `WindowLocator` 포트 구현. xcap 창 열거 + 대소문자 무시 부분 문자열 매칭.
//! Windows에서는 생존/지오메트리 확인을 Win32 API로 직접 처리한다.

use enhancer_core::error::CoreError;
use enhancer_core::models::region::{Region, WindowHandle};
use enhancer_core::ports::window::WindowLocator;
use tracing::{debug, warn};
use xcap::Window;

/// 제목이 부분 문자열을 포함하는지 (대소문자 무시)
///
/// 빈 부분 문자열은 아무 창과도 일치하지 않는다.
pub fn title_matches(title: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return false;
    }
    title.to_lowercase().contains(&needle.to_lowercase())
}

/// 열거 순서대로 첫 일치 창 선택
///
/// 같은 부분 문자열을 가진 창이 여럿이면 결과는 플랫폼 열거 순서에 따른다.
pub fn first_match<I>(windows: I, needle: &str) -> Option<WindowHandle>
where
    I: IntoIterator<Item = (u32, String)>,
{
    windows
        .into_iter()
        .find(|(_, title)| title_matches(title, needle))
        .map(|(id, title)| WindowHandle::new(id, title))
}

/// 열거 결과를 생존 여부로 해석
///
/// 열거 자체가 실패하면 창이 닫혔다고 단정하지 않는다. 실패가 이어지면
/// 다음 영역 조회가 에러를 드러내 치명적 에러로 끝난다.
pub fn liveness(lookup: Result<bool, CoreError>) -> bool {
    match lookup {
        Ok(found) => found,
        Err(e) => {
            warn!("창 생존 확인 실패, 생존으로 간주: {e}");
            true
        }
    }
}

/// xcap 기반 창 탐색기: `WindowLocator` 포트 구현
#[derive(Debug, Default)]
pub struct XcapWindowLocator;

impl XcapWindowLocator {
    pub fn new() -> Self {
        Self
    }

    /// 현재 열거 가능한 창 목록
    fn list_windows() -> Result<Vec<Window>, CoreError> {
        Window::all().map_err(|e| CoreError::Internal(format!("창 목록 조회 실패: {e}")))
    }

    /// ID로 창 재조회
    fn lookup(id: u32) -> Result<Option<Window>, CoreError> {
        Ok(Self::list_windows()?
            .into_iter()
            .find(|w| w.id().map(|wid| wid == id).unwrap_or(false)))
    }

    /// xcap 창에서 영역 읽기 (최소화면 크기 0)
    fn region_of(window: &Window) -> Result<Region, CoreError> {
        let read = |what: &str, e: xcap::XCapError| {
            CoreError::Capture(format!("창 {what} 조회 실패: {e}"))
        };
        let left = window.x().map_err(|e| read("x", e))?;
        let top = window.y().map_err(|e| read("y", e))?;
        if window.is_minimized().unwrap_or(false) {
            return Ok(Region::new(left, top, 0, 0));
        }
        let width = window.width().map_err(|e| read("너비", e))?;
        let height = window.height().map_err(|e| read("높이", e))?;
        Ok(Region::new(left, top, width, height))
    }
}

impl WindowLocator for XcapWindowLocator {
    fn find_window(&self, title_substring: &str) -> Result<WindowHandle, CoreError> {
        let candidates = Self::list_windows()?.into_iter().filter_map(|w| {
            let id = w.id().ok()?;
            let title = w.title().ok()?;
            Some((id, title))
        });

        match first_match(candidates, title_substring) {
            Some(handle) => {
                debug!("창 발견: '{}' (id {})", handle.title, handle.id);
                Ok(handle)
            }
            None => Err(CoreError::WindowNotFound(title_substring.to_string())),
        }
    }

    fn is_alive(&self, handle: &WindowHandle) -> bool {
        #[cfg(target_os = "windows")]
        {
            crate::windows::is_window_alive(handle.id)
        }

        // 생존 확인 API가 없어 호출마다 전체 창을 한 번 열거한다.
        #[cfg(not(target_os = "windows"))]
        {
            liveness(Self::lookup(handle.id).map(|found| found.is_some()))
        }
    }

    fn region(&self, handle: &WindowHandle) -> Result<Region, CoreError> {
        #[cfg(target_os = "windows")]
        if let Some(region) = crate::windows::window_region(handle.id) {
            return Ok(region);
        }

        match Self::lookup(handle.id)? {
            Some(window) => Self::region_of(&window),
            None => Err(CoreError::Capture(format!(
                "창이 사라짐: '{}' (id {})",
                handle.title, handle.id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<(u32, String)> {
        vec![
            (11, "Untitled - Notepad".to_string()),
            (22, "Calculator".to_string()),
            (33, "Scientific calculator help".to_string()),
        ]
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(title_matches("Calculator", "calc"));
        assert!(title_matches("my CALCULATOR", "Calculator"));
        assert!(!title_matches("Notepad", "calc"));
    }

    #[test]
    fn empty_needle_matches_nothing() {
        assert!(!title_matches("Calculator", ""));
        assert!(!title_matches("Calculator", "   "));
        assert!(first_match(listing(), "").is_none());
    }

    #[test]
    fn first_in_enumeration_order_wins() {
        let handle = first_match(listing(), "CALCULATOR").unwrap();
        assert_eq!(handle.id, 22);
        assert_eq!(handle.title, "Calculator");
    }

    #[test]
    fn no_match_is_none() {
        assert!(first_match(listing(), "Paint").is_none());
    }

    #[test]
    fn enumeration_failure_is_not_window_lost() {
        assert!(liveness(Ok(true)));
        assert!(!liveness(Ok(false)));
        assert!(liveness(Err(CoreError::Internal("열거 실패".to_string()))));
    }
}
