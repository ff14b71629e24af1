//! # 문자열 유틸리티
//!
//! 문자열 검증과 식별자 파싱에 사용하는 공통 함수들입니다.

use mongodb::bson::oid::ObjectId;
use crate::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  Hello  ", "name").unwrap(), "Hello");
/// assert!(validate_required_string("   ", "name").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 문자열이 유효한지 확인 (빈 문자열이 아니고 공백만으로 구성되지 않음)
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 24자리 hex 문자열을 ObjectId로 변환합니다.
///
/// # 반환값
/// * `Ok(ObjectId)` - 파싱 성공
/// * `Err(AppError::ValidationError)` - 형식이 맞지 않는 경우
pub fn parse_object_id(value: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(value.trim())
        .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
}
