//! 필드 단위 갱신 요청 파싱
//!
//! 각 엔티티는 설정 가능한 필드를 열거형으로 선언하고 [`FieldUpdate`]를 구현합니다.
//! JSON 매핑의 키는 저장 문서의 필드명(camelCase)과 같습니다.

use mongodb::bson::{oid::ObjectId, Bson};
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::errors::{AppError, AppResult};

/// 엔티티별 필드 갱신 열거형이 구현하는 trait
pub trait FieldUpdate: Sized {
    /// 저장 필드명과 JSON 값으로부터 갱신 요청을 만듭니다.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(field))` - 설정 가능한 필드
    /// * `Ok(None)` - 알 수 없거나 설정할 수 없는 키
    /// * `Err(AppError::ValidationError)` - 값의 타입이 맞지 않음
    fn parse(key: &str, value: Value) -> AppResult<Option<Self>>;
}

fn type_mismatch(key: &str, detail: impl std::fmt::Display) -> AppError {
    AppError::ValidationError(format!("필드 `{}`의 값이 올바르지 않습니다: {}", key, detail))
}

/// JSON 값을 BSON(확장 JSON 허용)을 거쳐 원하는 타입으로 변환합니다.
///
/// `{"$oid": "..."}`, `{"$date": "..."}` 형식의 중첩 값도 처리됩니다.
pub fn decode<T: DeserializeOwned>(key: &str, value: Value) -> AppResult<T> {
    let bson = Bson::try_from(value).map_err(|e| type_mismatch(key, e))?;
    mongodb::bson::from_bson(bson).map_err(|e| type_mismatch(key, e))
}

/// 24자리 hex 문자열 또는 `{"$oid": ...}` 값을 ObjectId로 변환합니다.
pub fn object_id(key: &str, value: Value) -> AppResult<ObjectId> {
    match value {
        Value::String(hex) => ObjectId::parse_str(hex.trim()).map_err(|e| type_mismatch(key, e)),
        other => decode(key, other),
    }
}

/// `null`은 `None`으로 변환합니다.
pub fn optional_object_id(key: &str, value: Value) -> AppResult<Option<ObjectId>> {
    match value {
        Value::Null => Ok(None),
        other => object_id(key, other).map(Some),
    }
}

pub fn object_ids(key: &str, value: Value) -> AppResult<Vec<ObjectId>> {
    match value {
        Value::Array(items) => items.into_iter().map(|item| object_id(key, item)).collect(),
        other => Err(type_mismatch(key, format!("배열이 필요합니다 ({})", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_primitives() {
        let budget: f64 = decode("budget", json!(1500)).unwrap();
        let skills: Vec<String> = decode("skills", json!(["rust", "mongodb"])).unwrap();

        assert_eq!(budget, 1500.0);
        assert_eq!(skills, vec!["rust".to_string(), "mongodb".to_string()]);
    }

    #[test]
    fn test_decode_rejects_wrong_type() {
        let result: AppResult<bool> = decode("read", json!("yes"));

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_object_id_accepts_hex_and_extended_json() {
        let id = ObjectId::new();

        assert_eq!(object_id("clientId", json!(id.to_hex())).unwrap(), id);
        assert_eq!(object_id("clientId", json!({ "$oid": id.to_hex() })).unwrap(), id);
        assert!(object_id("clientId", json!("not-an-id")).is_err());
    }

    #[test]
    fn test_optional_and_list_ids() {
        let id = ObjectId::new();

        assert_eq!(optional_object_id("freelancerId", Value::Null).unwrap(), None);
        assert_eq!(
            object_ids("participants", json!([id.to_hex(), id.to_hex()])).unwrap(),
            vec![id, id]
        );
        assert!(object_ids("participants", json!(id.to_hex())).is_err());
    }
}
