//! 컬렉션 관리 응답 DTO

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// 컬렉션 목록
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionListResponse {
    pub collections: Vec<String>,
}

/// 컬렉션/인덱스 생성 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvisionReport {
    /// 새로 만든 컬렉션
    pub created: Vec<String>,
    /// 이미 있던 컬렉션
    pub existing: Vec<String>,
    /// `컬렉션.인덱스명` 형식
    pub indexes: Vec<String>,
}

/// 컬렉션 삭제 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropReport {
    pub dropped: Vec<String>,
    pub missing: Vec<String>,
}

/// 컬렉션별 시드 레코드 수
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedReport {
    pub counts: BTreeMap<String, usize>,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// 레코드 목록 (일반 JSON으로 변환된 문서)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsResponse {
    pub collection: String,
    pub count: usize,
    pub records: Vec<serde_json::Value>,
}

/// 삭제 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}
