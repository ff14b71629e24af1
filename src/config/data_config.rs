//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 시드 데이터, 요청 제한 관련 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// MongoDB 연결 설정
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database_name: String,
    pub app_name: String,
}

impl DatabaseConfig {
    pub const DEFAULT_URI: &'static str = "mongodb://localhost:27017";
    pub const DEFAULT_DATABASE_NAME: &'static str = "FreelancerManagement";

    /// 환경 변수에서 연결 설정을 읽습니다.
    ///
    /// # Environment Variables
    ///
    /// - `MONGODB_URI`: 기본값 `mongodb://localhost:27017`
    /// - `DATABASE_NAME`: 기본값 `FreelancerManagement`
    pub fn from_env() -> Self {
        Self::from_values(env::var("MONGODB_URI").ok(), env::var("DATABASE_NAME").ok())
    }

    pub fn from_values(uri: Option<String>, database_name: Option<String>) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Self {
            uri: non_blank(uri).unwrap_or_else(|| Self::DEFAULT_URI.to_string()),
            database_name: non_blank(database_name)
                .unwrap_or_else(|| Self::DEFAULT_DATABASE_NAME.to_string()),
            app_name: "freelancer_management".to_string(),
        }
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위의 값이면 그 값을 사용합니다.
    ///
    /// # Environment Defaults
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (고보안)
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다. 기본값: 8080
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다. 기본값: "127.0.0.1"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// 시드 데이터 생성 설정
pub struct SeedConfig;

impl SeedConfig {
    pub const DEFAULT_MAX_COUNT: u32 = 500;

    /// 한 번의 시드 요청에서 컬렉션별로 생성할 수 있는 최대 레코드 수
    ///
    /// `SEED_MAX_COUNT` 값이 1 이상이면 그 값을 사용합니다.
    pub fn max_count() -> u32 {
        Self::parse_max_count(env::var("SEED_MAX_COUNT").ok().as_deref())
    }

    pub fn parse_max_count(value: Option<&str>) -> u32 {
        value
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|count| *count >= 1)
            .unwrap_or(Self::DEFAULT_MAX_COUNT)
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경 변수에서 Rate Limiting 설정을 읽습니다.
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(100);

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(200);

        Self { per_second, burst_size }
    }
}
