//! User Entity Implementation
//!
//! 마켓플레이스의 기본 사용자 계정입니다.
//! 저장 문서의 모든 필드가 필수이며, 내부 필드 `password_hash`, `profile_picture`는
//! 각각 `passwordHash`, `profilePicture`로 저장됩니다.

use mongodb::bson::{doc, oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use log::{error, info, warn};
use crate::domain::entities::fields::{decode, FieldUpdate};
use crate::domain::entities::{Collection, Entity};
use crate::errors::{AppError, AppResult};
use crate::store::DocumentStore;

/// 사용자 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    /// bcrypt 해시
    pub password_hash: String,
    /// 프로필 이미지 URL
    pub profile_picture: String,
    pub bio: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// [`User`]의 설정 가능한 필드
#[derive(Debug, Clone, PartialEq)]
pub enum UserField {
    Name(String),
    Email(String),
    PasswordHash(String),
    ProfilePicture(String),
    Bio(String),
}

impl FieldUpdate for UserField {
    fn parse(key: &str, value: Value) -> AppResult<Option<Self>> {
        let field = match key {
            "name" => UserField::Name(decode(key, value)?),
            "email" => UserField::Email(decode(key, value)?),
            "passwordHash" => UserField::PasswordHash(decode(key, value)?),
            "profilePicture" => UserField::ProfilePicture(decode(key, value)?),
            "bio" => UserField::Bio(decode(key, value)?),
            _ => return Ok(None),
        };
        Ok(Some(field))
    }
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            profile_picture: String::new(),
            bio: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 이메일로 사용자를 조회합니다. 없으면 `Ok(None)`입니다.
    pub async fn find_by_email(store: &dyn DocumentStore, email: &str) -> AppResult<Option<Self>> {
        let found = store
            .collection(Self::COLLECTION.name())
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| {
                error!("이메일 {}로 사용자 조회 실패: {}", email, e);
                AppError::from(e)
            })?;

        match found {
            Some(document) => {
                info!("이메일 {}로 사용자를 찾았습니다", email);
                Self::from_document(document).map(Some)
            }
            None => {
                warn!("이메일 {}에 해당하는 사용자가 없습니다", email);
                Ok(None)
            }
        }
    }
}

impl Entity for User {
    const COLLECTION: Collection = Collection::Users;
    const KIND: &'static str = "User";

    type Field = UserField;

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: Option<ObjectId>) {
        self.id = id;
    }

    fn touch(&mut self, now: DateTime) {
        self.updated_at = now;
    }

    fn apply_field(&mut self, field: UserField) {
        match field {
            UserField::Name(name) => self.name = name,
            UserField::Email(email) => self.email = email,
            UserField::PasswordHash(hash) => self.password_hash = hash,
            UserField::ProfilePicture(url) => self.profile_picture = url,
            UserField::Bio(bio) => self.bio = bio,
        }
    }
}
