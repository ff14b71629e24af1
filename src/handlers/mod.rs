//! # HTTP Request Handlers Module
//!
//! 관리 API의 HTTP 요청을 처리하는 핸들러 함수들입니다.
//! 핸들러는 요청 DTO를 검증하고 서비스에 위임한 뒤 결과를 JSON으로 응답합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (curl, 관리 도구)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                            ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services                                      ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Entities / DocumentStore                      ← Domain / Store
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 저장소 주입
//!
//! 저장소는 `web::Data<dyn DocumentStore>`로 주입됩니다.
//! 운영에서는 MongoDB, 테스트에서는 메모리 저장소가 들어갑니다.
//!
//! ```rust,ignore
//! let store: Arc<dyn DocumentStore> = Arc::new(database);
//!
//! App::new()
//!     .app_data(web::Data::from(store))
//!     .configure(configure_all_routes)
//! ```
//!
//! ## 에러 처리
//!
//! 핸들러는 `Result<HttpResponse, AppError>`를 반환하며, `AppError`의
//! `ResponseError` 구현이 상태 코드와 `{"error": "..."}` 본문을 만듭니다.
//!
//! ## 모듈 구성
//!
//! - **`collections`**: 컬렉션 목록/생성/삭제, 시드 데이터
//! - **`records`**: 컬렉션 이름 기반 레코드 조회/수정/삭제
//! - **`marketplace`**: 입찰, 상태, 리뷰, 대화, 알림, 결제, 카테고리 연산

pub mod collections;
pub mod records;
pub mod marketplace;
