//! # soteria-core
//!
//! Soteria 콘솔 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: API 요청/응답 구조체 (serde Serialize/Deserialize)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스
//! - [`error`]: 핵심 에러 타입 + 서버 상태 코드 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)
//! - [`token_store`]: 인증 토큰 저장소 (파일/메모리)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;
pub mod token_store;
