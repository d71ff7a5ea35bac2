//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 각 어댑터 crate가 이 trait들을 구현하며,
//! `enhancer-app`의 캡처 루프가 `Box<dyn T>`로 와이어링한다.
//!
//! 루프는 단일 스레드에서 블로킹으로 동작하므로 모든 포트는 동기 trait이다.
//! 호출자가 루프를 별도 스레드로 옮길 수 있도록 `Send`만 요구한다.

pub mod capture;
pub mod enhance;
pub mod presenter;
pub mod random;
pub mod window;
