//! # 애그리거트 연산 요청 DTO
//!
//! 엔티티 계층은 금액, 평점 등을 검증하지 않으므로
//! HTTP 경계에서 이 DTO들이 입력값을 검증합니다.
//!
//! ## 검증 규칙
//!
//! - ID 필드: 24자리 hex ObjectId
//! - 입찰 금액: 0보다 커야 함
//! - 평점: 1-5
//! - 내용/상태 문자열: 공백만으로 구성될 수 없음

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::models::ReviewKind;
use crate::utils::string_utils::is_valid_string;

/// 입찰 추가 요청
///
/// ```json
/// { "freelancer_id": "65a1...", "amount": 900.0, "message": "Can start Monday" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddBidRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub freelancer_id: String,
    #[validate(range(exclusive_min = 0.0, message = "입찰 금액은 0보다 커야 합니다"))]
    pub amount: f64,
    #[serde(default)]
    pub message: String,
}

/// 상태 변경 요청 (프로젝트, 결제 공용)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub status: String,
}

/// 프로젝트 리뷰 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddReviewRequest {
    pub kind: ReviewKind,
    #[validate(range(min = 1, max = 5, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

/// 대화에 일반 메시지 추가
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostMessageRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub sender_id: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,
}

/// 답장 추가 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddReplyRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub replied_to_message_id: String,
    #[validate(custom(function = "validate_object_id"))]
    pub sender_id: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,
}

/// 메시지 전달 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForwardMessageRequest {
    #[validate(custom(function = "validate_object_id"))]
    pub message_id: String,
}

/// 카테고리 이름 변경 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameCategoryRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
}

/// 24자리 hex ObjectId 형식인지 검증합니다.
fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    mongodb::bson::oid::ObjectId::parse_str(value.trim())
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_object_id")
            .with_message("유효하지 않은 ID 형식입니다".into()))
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if is_valid_string(value) {
        Ok(())
    } else {
        Err(ValidationError::new("blank").with_message("값이 비어 있습니다".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn test_bid_amount_must_be_positive() {
        let valid = AddBidRequest {
            freelancer_id: ObjectId::new().to_hex(),
            amount: 10.0,
            message: "hi".to_string(),
        };
        let zero = AddBidRequest { amount: 0.0, ..valid.clone() };

        assert!(valid.validate().is_ok());
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_bid_rejects_malformed_id() {
        let request = AddBidRequest {
            freelancer_id: "12345".to_string(),
            amount: 10.0,
            message: String::new(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_review_request_from_json() {
        let request: AddReviewRequest =
            serde_json::from_value(json!({ "kind": "client", "rating": 4, "comment": "good" })).unwrap();

        assert_eq!(request.kind, ReviewKind::Client);
        assert!(request.validate().is_ok());

        let out_of_range = AddReviewRequest { rating: 6, ..request };
        assert!(out_of_range.validate().is_err());
    }

    #[test]
    fn test_blank_strings_are_rejected() {
        assert!(UpdateStatusRequest { status: "  ".to_string() }.validate().is_err());
        assert!(RenameCategoryRequest { name: "Design".to_string() }.validate().is_ok());
    }
}
