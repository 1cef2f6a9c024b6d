//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 어댑터는 `soteria-network`, `soteria-console` crate가 구현하며
//! 바이너리에서 `Arc<dyn T>`로 와이어링한다.
//!
//! async trait은 `async_trait` 매크로로 object safety를 보장한다.

pub mod notifier;
pub mod settings_api;
pub mod token_store;
