//! 프리랜서/클라이언트 프로필에 포함되는 값 레코드

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// 프리랜서가 제공하는 서비스
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    /// 작업물 URL
    pub project: String,
    pub description: String,
}

/// 프리랜서가 받은 리뷰
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreelancerReview {
    pub reviewer: String,
    pub rating: i32,
    pub comment: String,
}

/// 클라이언트가 작성한 리뷰
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GivenReview {
    pub freelancer: ObjectId,
    pub rating: i32,
    pub review: String,
}
