//! Simple Enhancer 도메인 모델.
//!
//! 캡처 루프가 한 반복 안에서 주고받는 데이터 구조체를 정의한다.

pub mod frame;
pub mod region;
pub mod sampling;
pub mod session;
pub mod telemetry;
pub mod tensor;
