//! # Configuration Module
//!
//! 서비스 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 한 곳에서 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 데이터베이스, 서버, 시드, Rate Limiting 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{DatabaseConfig, ServerConfig};
//!
//! let database = DatabaseConfig::from_env();
//! println!("{} @ {}", database.database_name, ServerConfig::bind_address());
//! ```
//!
//! ## 환경 변수
//!
//! ```bash
//! export ENVIRONMENT="development"   # development, test, staging, production
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="FreelancerManagement"
//! export HOST="127.0.0.1"
//! export PORT="8080"
//! export BCRYPT_COST="10"            # 4-15 범위
//! export SEED_MAX_COUNT="500"
//! export RATE_LIMIT_PER_SECOND="100"
//! export RATE_LIMIT_BURST_SIZE="200"
//! ```
//!
//! 설정 파일은 `PROFILE`에 따라 `.env.dev`, `.env.prod`, `.env` 순으로 선택됩니다.

pub mod data_config;

pub use data_config::*;
