//! 저장 문서를 일반 JSON으로 변환합니다.
//!
//! 관리 API 응답에서 ObjectId는 hex 문자열로, 날짜는 RFC 3339 문자열로 표시됩니다.
//! 그 외 BSON 전용 타입은 relaxed extended JSON 형태를 따릅니다.

use mongodb::bson::{Bson, Document};
use serde_json::{Map, Number, Value};

pub fn clean_record(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(date) => date
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::from(date.timestamp_millis())),
        Bson::Document(document) => clean_document(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(clean_record).collect()),
        Bson::Double(number) => Number::from_f64(number).map(Value::Number).unwrap_or(Value::Null),
        Bson::Int32(number) => Value::from(number),
        Bson::Int64(number) => Value::from(number),
        Bson::String(text) => Value::String(text),
        Bson::Boolean(flag) => Value::Bool(flag),
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Decimal128(decimal) => Value::String(decimal.to_string()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn clean_document(document: Document) -> Value {
    let fields: Map<String, Value> = document
        .into_iter()
        .map(|(key, value)| (key, clean_record(value)))
        .collect();
    Value::Object(fields)
}
