//! Windows 플랫폼: 창 생존/지오메트리 빠른 경로.
//!
//! Win32 API `IsWindow` + `IsWindowVisible` + `IsIconic` + `GetWindowRect` 기반.
//! xcap의 창 ID는 Windows에서 HWND 값이다.

#![cfg(target_os = "windows")]

use enhancer_core::models::region::Region;
use tracing::debug;
use windows_sys::Win32::Foundation::{HWND, RECT};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    GetWindowRect, IsIconic, IsWindow, IsWindowVisible,
};

fn hwnd_of(id: u32) -> HWND {
    id as usize as HWND
}

/// 창이 존재하고 보이는지
pub fn is_window_alive(id: u32) -> bool {
    let hwnd = hwnd_of(id);
    unsafe { IsWindow(hwnd) != 0 && IsWindowVisible(hwnd) != 0 }
}

/// 현재 창 영역. 최소화 상태면 크기 0, 조회 실패 시 None.
pub fn window_region(id: u32) -> Option<Region> {
    let hwnd = hwnd_of(id);
    unsafe {
        if IsWindow(hwnd) == 0 {
            return None;
        }

        let mut rect: RECT = std::mem::zeroed();
        if GetWindowRect(hwnd, &mut rect) == 0 {
            debug!("GetWindowRect 실패 (hwnd {id:#x})");
            return None;
        }

        if IsIconic(hwnd) != 0 {
            return Some(Region::new(rect.left, rect.top, 0, 0));
        }

        let width = (rect.right - rect.left).max(0) as u32;
        let height = (rect.bottom - rect.top).max(0) as u32;
        Some(Region::new(rect.left, rect.top, width, height))
    }
}
