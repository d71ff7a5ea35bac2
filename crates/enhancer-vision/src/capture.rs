//! 영역 스크린 캡처.
//!
//! xcap 기반. 영역 원점과 가장 많이 겹치는 모니터에서 해당 직사각형만 캡처하고
//! RGBA → BGR로 변환한다 (알파 제거).

use enhancer_core::error::CoreError;
use enhancer_core::models::frame::{Frame, CHANNELS};
use enhancer_core::models::region::Region;
use enhancer_core::ports::capture::FrameSource;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::{debug, trace};
use xcap::Monitor;

/// 두 영역의 교집합 (없으면 None)
pub fn intersect(a: &Region, b: &Region) -> Option<Region> {
    let left = a.left.max(b.left);
    let top = a.top.max(b.top);
    let right = (a.left as i64 + a.width as i64).min(b.left as i64 + b.width as i64);
    let bottom = (a.top as i64 + a.height as i64).min(b.top as i64 + b.height as i64);
    if right <= left as i64 || bottom <= top as i64 {
        return None;
    }
    Some(Region::new(
        left,
        top,
        (right - left as i64) as u32,
        (bottom - top as i64) as u32,
    ))
}

/// 잘린 캡처 이미지를 원래 영역 크기의 BGR 프레임에 배치
///
/// 화면 밖 부분은 검은색으로 남는다. HiDPI 모니터에서는 캡처 이미지가
/// 논리 좌표 크기의 배수(물리 픽셀)로 오므로 보이는 영역 크기로 축소한 뒤 배치한다.
pub fn compose_frame(region: &Region, visible: &Region, image: &RgbaImage) -> Frame {
    let scaled;
    let image = if image.dimensions() != (visible.width, visible.height) {
        trace!(
            "캡처 이미지 배율 보정: {:?} → {}x{}",
            image.dimensions(),
            visible.width,
            visible.height
        );
        scaled = imageops::resize(image, visible.width, visible.height, FilterType::Triangle);
        &scaled
    } else {
        image
    };

    if visible == region && image.dimensions() == (region.width, region.height) {
        if let Ok(frame) = Frame::from_rgba(region.width, region.height, image.as_raw()) {
            return frame;
        }
    }

    let width = region.width as usize;
    let mut data = Frame::black(region.width, region.height).into_data();
    let dx = (visible.left - region.left).max(0) as usize;
    let dy = (visible.top - region.top).max(0) as usize;
    let (iw, ih) = image.dimensions();

    for y in 0..(ih.min(visible.height) as usize) {
        let row = dy + y;
        if row >= region.height as usize {
            break;
        }
        for x in 0..(iw.min(visible.width) as usize) {
            let col = dx + x;
            if col >= width {
                break;
            }
            let px = image.get_pixel(x as u32, y as u32).0;
            let offset = (row * width + col) * CHANNELS;
            data[offset] = px[2];
            data[offset + 1] = px[1];
            data[offset + 2] = px[0];
        }
    }

    Frame::from_bgr(region.width, region.height, data)
        .unwrap_or_else(|_| Frame::black(region.width, region.height))
}

/// xcap 영역 캡처: `FrameSource` 포트 구현
///
/// 모니터 핸들은 스레드 간 이동이 보장되지 않으므로 화면 좌표만 캐시하고,
/// 캡처할 때마다 해당 모니터를 좌표로 다시 조회한다.
#[derive(Debug, Default)]
pub struct XcapFrameSource {
    /// 모니터 화면 좌표 캐시 (영역이 어느 모니터에도 없으면 갱신)
    monitor_bounds: Vec<Region>,
}

impl XcapFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn refresh_monitors(&mut self) -> Result<(), CoreError> {
        let monitors = Monitor::all()
            .map_err(|e| CoreError::Capture(format!("모니터 목록 조회 실패: {e}")))?;

        self.monitor_bounds = monitors
            .iter()
            .filter_map(|monitor| {
                Some(Region::new(
                    monitor.x().ok()?,
                    monitor.y().ok()?,
                    monitor.width().ok()?,
                    monitor.height().ok()?,
                ))
            })
            .collect();

        if self.monitor_bounds.is_empty() {
            return Err(CoreError::Capture("모니터를 찾을 수 없음".to_string()));
        }
        debug!("모니터 {}개 발견", self.monitor_bounds.len());
        Ok(())
    }

    fn best_monitor(&self, region: &Region) -> Option<(Region, Region)> {
        best_overlap(&self.monitor_bounds, region)
    }
}

/// 영역과 가장 많이 겹치는 모니터 좌표와 그 교집합
///
/// 영역 원점이 어느 모니터에 있는지는 따지지 않는다.
pub fn best_overlap(monitors: &[Region], region: &Region) -> Option<(Region, Region)> {
    monitors
        .iter()
        .filter_map(|bounds| intersect(region, bounds).map(|v| (*bounds, v)))
        .max_by_key(|(_, v)| v.width as u64 * v.height as u64)
}

impl FrameSource for XcapFrameSource {
    fn capture(&mut self, region: &Region) -> Result<Frame, CoreError> {
        if self.best_monitor(region).is_none() {
            self.refresh_monitors()?;
        }

        let Some((bounds, visible)) = self.best_monitor(region) else {
            trace!("영역이 화면 밖: {:?}", region);
            return Ok(Frame::black(region.width, region.height));
        };

        let monitor = Monitor::from_point(bounds.left, bounds.top)
            .map_err(|e| CoreError::Capture(format!("모니터 조회 실패: {e}")))?;

        let image = monitor
            .capture_region(
                (visible.left - bounds.left) as u32,
                (visible.top - bounds.top) as u32,
                visible.width,
                visible.height,
            )
            .map_err(|e| CoreError::Capture(format!("스크린 캡처 실패: {e}")))?;

        Ok(compose_frame(region, &visible, &image))
    }
}
