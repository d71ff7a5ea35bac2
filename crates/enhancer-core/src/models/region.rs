//! 창 핸들과 화면 영역 모델.

use serde::{Deserialize, Serialize};

/// 최상위 창 핸들
///
/// 네이티브 창 ID와 조회 시점의 제목. 창이 닫히는 순간 무효가 되며,
/// 무효화는 이 시스템이 일으키는 것이 아니라 관찰할 뿐이다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowHandle {
    /// 네이티브 창 ID (Windows에서는 HWND)
    pub id: u32,
    /// 조회 시점의 창 제목
    pub title: String,
}

impl WindowHandle {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// 화면 좌표계 직사각형
///
/// 너비나 높이가 0이면 최소화(또는 크기 없는) 창을 뜻한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// 면적이 0인지 (최소화 상태)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// 너비 또는 높이가 `tolerance` 픽셀을 초과해 달라졌는지
    pub fn size_differs(&self, other: &Region, tolerance: u32) -> bool {
        self.width.abs_diff(other.width) > tolerance
            || self.height.abs_diff(other.height) > tolerance
    }

    /// 같은 크기에서 위치만 옮긴 영역
    pub fn moved_to(&self, left: i32, top: i32) -> Region {
        Region { left, top, ..*self }
    }
}
