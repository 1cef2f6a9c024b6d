//! 설정 화면.

pub mod nginx_config;
pub mod restart_notice;
