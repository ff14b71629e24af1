//! # 컬렉션 관리 요청 DTO
//!
//! 컬렉션 삭제, 시드 데이터 생성, 레코드 목록 조회 요청을 정의합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 전체 컬렉션 삭제 요청
///
/// `confirmation`이 정확히 `delete_collections`일 때만 삭제가 수행됩니다.
///
/// ```json
/// { "confirmation": "delete_collections" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DropCollectionsRequest {
    #[validate(length(min = 1, message = "확인 문구를 입력해주세요"))]
    pub confirmation: String,
}

/// 시드 데이터 생성 요청
///
/// `count`는 컬렉션마다 생성할 레코드 수입니다.
/// 상한은 `SEED_MAX_COUNT` 설정으로 서비스에서 검사합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SeedRequest {
    #[validate(range(min = 1, message = "count는 1 이상이어야 합니다"))]
    pub count: u32,
    /// 재현 가능한 데이터를 위한 난수 시드
    #[serde(default)]
    pub seed: Option<u64>,
}

/// 레코드 목록 조회 쿼리 (`?limit=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RecordsQuery {
    #[validate(range(min = 1, max = 1000, message = "limit는 1-1000 사이여야 합니다"))]
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_request_bounds() {
        assert!(SeedRequest { count: 10, seed: None }.validate().is_ok());
        assert!(SeedRequest { count: 0, seed: None }.validate().is_err());
        assert!(SeedRequest { count: 2000, seed: Some(7) }.validate().is_ok());
    }

    #[test]
    fn test_records_query_limit_is_optional() {
        assert!(RecordsQuery::default().validate().is_ok());
        assert!(RecordsQuery { limit: Some(0) }.validate().is_err());
    }

    #[test]
    fn test_drop_request_requires_confirmation() {
        let request = DropCollectionsRequest { confirmation: String::new() };

        assert!(request.validate().is_err());
    }
}
