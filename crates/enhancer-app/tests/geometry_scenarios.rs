//! 창 지오메트리 시나리오 테스트.
//!
//! 최소화(크기 0) 처리, 리사이즈 허용 오차, 창 이동 추적을 검증한다.

mod common;

use std::path::Path;

use common::{region, session, FakeLoader};
use enhancer_app::{run_with, RunError};
use enhancer_core::models::region::Region;
use enhancer_core::models::session::RunStatus;

const MODEL: &str = "model.onnx";

#[test]
fn zero_area_region_is_never_captured() {
    let (session, h) = session(
        &["Calculator"],
        vec![region(0, 0), region(0, 0), region(0, 0), region(16, 12)],
        Box::new(FakeLoader::identity()),
        Some(3),
    );

    let outcome = run_with(session, "Calculator", Path::new(MODEL)).unwrap();

    assert_eq!(outcome.status, RunStatus::Stopped);
    assert_eq!(outcome.stats.minimized_skips, 2);
    assert_eq!(outcome.stats.frames_presented, 3);

    let captured = h.captured.lock();
    assert_eq!(captured.len(), 3);
    assert!(captured.iter().all(|r| !r.is_empty()));

    // 최소화 중에는 카운터가 멈추므로 복원 후 첫 프레임이 청크의 0번
    assert_eq!(outcome.stats.frames_enhanced, 1);
    assert_eq!(h.presenter.lock().surfaces, vec![region(16, 12)]);
}

#[test]
fn minimized_window_still_honours_cancel() {
    let (session, h) = session(
        &["Calculator"],
        vec![region(0, 0)],
        Box::new(FakeLoader::identity()),
        Some(0),
    );

    let outcome = run_with(session, "Calculator", Path::new(MODEL)).unwrap();

    assert_eq!(outcome.status, RunStatus::Stopped);
    assert_eq!(outcome.stats.minimized_skips, 1);
    assert!(h.captured.lock().is_empty());
    assert!(h.presenter.lock().surfaces.is_empty());
}

#[test]
fn size_change_within_tolerance_keeps_surface() {
    // region 조회 순서: 시작, 프레임 0, 프레임 5, 프레임 10
    let (session, h) = session(
        &["Calculator"],
        vec![
            region(200, 100),
            region(200, 100),
            region(208, 95),
            region(200, 110),
        ],
        Box::new(FakeLoader::identity()),
        Some(12),
    );

    let outcome = run_with(session, "Calculator", Path::new(MODEL)).unwrap();

    assert_eq!(outcome.stats.surface_resizes, 0);
    assert_eq!(h.presenter.lock().surfaces, vec![region(200, 100)]);
    assert!(h
        .captured
        .lock()
        .iter()
        .all(|r| (r.width, r.height) == (200, 100)));
}

#[test]
fn size_change_beyond_tolerance_resizes_surface() {
    let (session, h) = session(
        &["Calculator"],
        vec![
            region(200, 100),
            region(200, 100),
            region(211, 100),
        ],
        Box::new(FakeLoader::identity()),
        Some(8),
    );

    let outcome = run_with(session, "Calculator", Path::new(MODEL)).unwrap();

    assert_eq!(outcome.stats.surface_resizes, 1);
    assert_eq!(
        h.presenter.lock().surfaces,
        vec![region(200, 100), region(211, 100)]
    );
    let captured = h.captured.lock();
    assert_eq!((captured[4].width, captured[4].height), (200, 100));
    assert_eq!((captured[5].width, captured[5].height), (211, 100));
}

#[test]
fn move_within_tolerance_follows_window() {
    let (session, h) = session(
        &["Calculator"],
        vec![
            Region::new(0, 0, 200, 100),
            Region::new(0, 0, 200, 100),
            Region::new(300, 40, 204, 100),
        ],
        Box::new(FakeLoader::identity()),
        Some(6),
    );

    let outcome = run_with(session, "Calculator", Path::new(MODEL)).unwrap();

    assert_eq!(outcome.stats.surface_resizes, 0);
    assert_eq!(h.presenter.lock().surfaces.len(), 1);
    let captured = h.captured.lock();
    assert_eq!(captured[4], Region::new(0, 0, 200, 100));
    assert_eq!(captured[5], Region::new(300, 40, 200, 100));
}

#[test]
fn geometry_is_rechecked_every_interval() {
    let (session, h) = session(
        &["Calculator"],
        vec![region(8, 6)],
        Box::new(FakeLoader::identity()),
        Some(11),
    );

    run_with(session, "Calculator", Path::new(MODEL)).unwrap();

    // 시작 1회 + 프레임 0, 5, 10
    assert_eq!(h.locator.lock().region_calls, 4);
}

#[test]
fn restore_from_minimized_to_tiny_window_resumes_capture() {
    let (session, h) = session(
        &["Calculator"],
        vec![region(0, 0), region(0, 0), region(8, 6)],
        Box::new(FakeLoader::identity()),
        Some(2),
    );

    let outcome = run_with(session, "Calculator", Path::new(MODEL)).unwrap();

    assert_eq!(outcome.status, RunStatus::Stopped);
    assert_eq!(outcome.stats.minimized_skips, 1);
    assert_eq!(outcome.stats.frames_presented, 2);
    assert_eq!(h.presenter.lock().surfaces, vec![region(8, 6)]);
}

#[test]
fn region_failure_on_closed_window_is_window_lost() {
    let (session, h) = session(
        &["Calculator"],
        vec![region(8, 6)],
        Box::new(FakeLoader::identity()),
        None,
    );
    {
        let mut script = h.locator.lock();
        // 시작 1회, 프레임 0 1회, 프레임 5에서 실패
        script.region_error_at = Some(3);
        // 프레임 0..=5 생존 확인 후 재확인에서 닫힘
        script.alive_calls = Some(6);
    }

    let outcome = run_with(session, "Calculator", Path::new(MODEL)).unwrap();

    assert_eq!(outcome.status, RunStatus::WindowLost);
    assert_eq!(outcome.stats.frames_presented, 5);
    assert!(h.presenter.lock().closed);
}

#[test]
fn region_failure_on_live_window_is_fatal() {
    let (session, h) = session(
        &["Calculator"],
        vec![region(8, 6)],
        Box::new(FakeLoader::identity()),
        None,
    );
    h.locator.lock().region_error_at = Some(3);

    let result = run_with(session, "Calculator", Path::new(MODEL));

    match result {
        Err(RunError::FatalError(msg)) => assert!(msg.contains("창 속성 조회 실패")),
        other => panic!("FatalError가 예상됨: {other:?}"),
    }
    let log = h.presenter.lock();
    assert_eq!(log.shown.len(), 5);
    assert!(log.closed);
}
