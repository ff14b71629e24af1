//! 시드 데이터 서비스
//!
//! 모든 컬렉션에 가짜 레코드를 만들어 엔티티 계약(`persist`)으로 저장합니다.
//! 레코드 사이의 참조는 실제로 저장된 ID를 사용합니다.
//!
//! ```text
//! Users ──┬── Freelancers ──┐
//!         ├── Clients ──────┼── Projects ── Payments
//!         ├── Admins        │
//!         ├── Messages      │
//!         └── Notifications ┘
//! Categories
//! ```

use std::sync::Arc;
use actix_web::web;
use bcrypt::hash;
use fake::faker::company::en::{Bs, Industry};
use fake::faker::internet::en::{Password, SafeEmail};
use fake::faker::lorem::en::{Paragraph, Sentence, Word, Words};
use fake::faker::name::en::Name;
use fake::Fake;
use log::{error, info};
use mongodb::bson::oid::ObjectId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;
use crate::config::{PasswordConfig, SeedConfig};
use crate::domain::dto::collections::{SeedReport, SeedRequest};
use crate::domain::entities::{
    Admin, Category, Client, Entity, Freelancer, Message, Notification, Payment, Project, User,
};
use crate::domain::models::{
    Bid, ConversationEvent, FreelancerReview, GivenReview, PortfolioItem, ProjectReviews, Review,
    ReviewKind, ServiceOffering, Status, TextMessage,
};
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::store::DocumentStore;

const ADMIN_ROLES: [&str; 3] = ["Super Admin", "Admin", "Moderator"];
const PROJECT_STATUSES: [&str; 4] = [
    Status::OPEN,
    Status::IN_PROGRESS,
    Status::COMPLETED,
    Status::CANCELLED,
];
const PAYMENT_STATUSES: [&str; 3] = [Payment::PENDING, Payment::COMPLETED, Payment::FAILED];
const NOTIFICATION_TYPES: [&str; 4] = ["Info", "Bid", "Payment", "Message"];

/// 시드 데이터 서비스
///
/// ## 주요 책임
///
/// - **요청 검증**: `count`가 `SEED_MAX_COUNT` 이하인지 확인
/// - **데이터 생성**: `fake`와 `rand`로 컬렉션마다 `count`건 생성
/// - **비밀번호 해싱**: 환경별 bcrypt cost로 블로킹 스레드 풀에서 해싱
/// - **저장**: 참조 순서(사용자 → 프로필 → 프로젝트 → 결제)대로 저장
///
/// 저장 중 오류가 나면 그 시점까지 저장된 레코드는 남습니다.
pub struct SeedService {
    store: Arc<dyn DocumentStore>,
    bcrypt_cost: u32,
}

impl SeedService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// 요청에 따라 시드 데이터를 생성합니다.
    ///
    /// `seed`가 주어지면 같은 값으로 같은 데이터가 만들어집니다.
    /// 비밀번호 해시와 이메일의 실행별 태그는 예외입니다.
    pub async fn seed(&self, request: &SeedRequest) -> AppResult<SeedReport> {
        let max_count = SeedConfig::max_count();
        if request.count == 0 || request.count > max_count {
            return Err(AppError::ValidationError(format!(
                "count는 1-{} 사이여야 합니다",
                max_count
            )));
        }

        let rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        self.seed_with(request.count as usize, rng).await
    }

    /// 주어진 난수 생성기로 컬렉션마다 `count`건을 생성하고 저장합니다.
    pub async fn seed_with<R: Rng + Send>(&self, count: usize, rng: R) -> AppResult<SeedReport> {
        let start_time = std::time::Instant::now();
        let mut records = FakeRecords::new(rng, run_tag());
        let mut report = SeedReport::default();

        let (mut users, passwords) = records.users(count);
        let hashes = hash_passwords(passwords, self.bcrypt_cost).await?;
        for (user, password_hash) in users.iter_mut().zip(hashes) {
            user.password_hash = password_hash;
        }
        let user_ids = self.persist_all(&mut users, &mut report).await?;

        let mut freelancers = records.freelancers(&users);
        let freelancer_ids = self.persist_all(&mut freelancers, &mut report).await?;

        let mut clients = records.clients(&users, &freelancer_ids);
        let client_ids = self.persist_all(&mut clients, &mut report).await?;

        let mut admins = records.admins(&user_ids);
        self.persist_all(&mut admins, &mut report).await?;

        let mut messages = records.messages(count, &user_ids);
        self.persist_all(&mut messages, &mut report).await?;

        let mut notifications = records.notifications(count, &user_ids);
        self.persist_all(&mut notifications, &mut report).await?;

        let mut projects = records.projects(count, &client_ids, &freelancer_ids);
        self.persist_all(&mut projects, &mut report).await?;

        let mut payments = records.payments(&projects, &freelancer_ids);
        self.persist_all(&mut payments, &mut report).await?;

        let mut categories = records.categories(count);
        self.persist_all(&mut categories, &mut report).await?;

        info!(
            "시드 데이터 {}건 생성 완료 ({:?})",
            report.total(),
            start_time.elapsed()
        );
        Ok(report)
    }

    async fn persist_all<E: Entity>(
        &self,
        records: &mut [E],
        report: &mut SeedReport,
    ) -> AppResult<Vec<ObjectId>> {
        let store = self.store.as_ref();
        let mut ids = Vec::with_capacity(records.len());

        for record in records.iter_mut() {
            let id = record.persist(store).await.map_err(|e| {
                error!("{} 시드 저장 실패: {}", E::COLLECTION, e);
                e
            })?;
            ids.push(id);
        }

        info!("{} {}건 저장", E::COLLECTION, ids.len());
        report.counts.insert(E::COLLECTION.name().to_string(), ids.len());
        Ok(ids)
    }
}

/// 비밀번호들을 블로킹 스레드 풀에서 bcrypt로 해싱합니다.
async fn hash_passwords(passwords: Vec<String>, cost: u32) -> AppResult<Vec<String>> {
    web::block(move || {
        passwords
            .iter()
            .map(|password| hash(password, cost))
            .collect::<Result<Vec<String>, _>>()
    })
    .await
    .context("비밀번호 해싱 작업 실패")?
    .context("비밀번호 해싱 실패")
}

/// 실행마다 다른 짧은 태그. 같은 난수 시드로 다시 실행해도 이메일이 겹치지 않습니다.
fn run_tag() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// 가짜 레코드 생성기
struct FakeRecords<R: Rng> {
    rng: R,
    run: String,
}

impl<R: Rng> FakeRecords<R> {
    fn new(rng: R, run: String) -> Self {
        Self { rng, run }
    }

    fn pick(&mut self, ids: &[ObjectId]) -> ObjectId {
        ids.choose(&mut self.rng).copied().unwrap_or_else(ObjectId::new)
    }

    fn pick_str(&mut self, values: &[&str]) -> String {
        values.choose(&mut self.rng).copied().unwrap_or_default().to_string()
    }

    fn sentence(&mut self) -> String {
        Sentence(4..10).fake_with_rng(&mut self.rng)
    }

    fn url(&mut self) -> String {
        let word: String = Word().fake_with_rng(&mut self.rng);
        format!("https://{}.example.com/{}", word, self.rng.gen_range(1..10_000))
    }

    /// 사용자와 평문 비밀번호를 만듭니다. 해시는 호출 측에서 채웁니다.
    fn users(&mut self, count: usize) -> (Vec<User>, Vec<String>) {
        (0..count)
            .map(|index| {
                let name: String = Name().fake_with_rng(&mut self.rng);
                let email: String = SafeEmail().fake_with_rng(&mut self.rng);
                let password: String = Password(8..16).fake_with_rng(&mut self.rng);

                let email = numbered_email(&email, &self.run, index);
                let mut user = User::new(name, email, String::new());
                user.profile_picture = format!(
                    "https://picsum.photos/seed/{}/200/200",
                    self.rng.gen_range(1..100_000)
                );
                user.bio = Paragraph(1..3).fake_with_rng(&mut self.rng);
                (user, password)
            })
            .unzip()
    }

    fn freelancers(&mut self, users: &[User]) -> Vec<Freelancer> {
        users
            .iter()
            .map(|user| {
                let mut freelancer = Freelancer::new(user.id, Some(user.email.clone()));
                freelancer.skills = Words(3..8).fake_with_rng(&mut self.rng);

                let services = self.rng.gen_range(1..=3);
                freelancer.services = (0..services)
                    .map(|_| ServiceOffering {
                        service: Bs().fake_with_rng(&mut self.rng),
                    })
                    .collect();

                let portfolio = self.rng.gen_range(1..=3);
                freelancer.portfolio = (0..portfolio)
                    .map(|_| PortfolioItem {
                        project: self.url(),
                        description: self.sentence(),
                    })
                    .collect();

                let reviews = self.rng.gen_range(1..=5);
                freelancer.reviews = (0..reviews)
                    .map(|_| FreelancerReview {
                        reviewer: Name().fake_with_rng(&mut self.rng),
                        rating: self.rng.gen_range(1..=5),
                        comment: self.sentence(),
                    })
                    .collect();

                freelancer.average_rating = Some(money(self.rng.gen_range(1.0..=5.0)));
                freelancer
            })
            .collect()
    }

    fn clients(&mut self, users: &[User], freelancer_ids: &[ObjectId]) -> Vec<Client> {
        users
            .iter()
            .map(|user| {
                let mut client = Client::new(user.id, Some(user.email.clone()));

                let hired = self.rng.gen_range(1..=5);
                client.hired_freelancers = (0..hired).map(|_| self.pick(freelancer_ids)).collect();

                let reviews = self.rng.gen_range(1..=5);
                client.reviews_given = (0..reviews)
                    .map(|_| GivenReview {
                        freelancer: self.pick(freelancer_ids),
                        rating: self.rng.gen_range(1..=5),
                        review: self.sentence(),
                    })
                    .collect();
                client
            })
            .collect()
    }

    fn admins(&mut self, user_ids: &[ObjectId]) -> Vec<Admin> {
        user_ids
            .iter()
            .map(|user_id| Admin::new(Some(*user_id), Some(self.pick_str(&ADMIN_ROLES))))
            .collect()
    }

    fn messages(&mut self, count: usize, user_ids: &[ObjectId]) -> Vec<Message> {
        (0..count)
            .map(|_| {
                let participants: Vec<ObjectId> =
                    user_ids.choose_multiple(&mut self.rng, 2).copied().collect();

                let events = self.rng.gen_range(1..=4);
                let messages = (0..events)
                    .map(|_| {
                        let sender = self.pick(&participants);
                        ConversationEvent::Text(TextMessage::new(sender, self.sentence()))
                    })
                    .collect();

                Message::from_parts(Uuid::new_v4().to_string(), participants, messages)
            })
            .collect()
    }

    fn notifications(&mut self, count: usize, user_ids: &[ObjectId]) -> Vec<Notification> {
        (0..count)
            .map(|_| {
                let user_id = self.pick(user_ids);
                let kind = self.pick_str(&NOTIFICATION_TYPES);
                let mut notification = Notification::new(Some(user_id), kind, self.sentence());

                if self.rng.gen_bool(0.5) {
                    notification.link = Some(self.url());
                }
                notification.read = self.rng.gen_bool(0.3);
                notification
            })
            .collect()
    }

    fn projects(
        &mut self,
        count: usize,
        client_ids: &[ObjectId],
        freelancer_ids: &[ObjectId],
    ) -> Vec<Project> {
        (0..count)
            .map(|_| {
                let title: String = Bs().fake_with_rng(&mut self.rng);
                let description: String = Paragraph(1..3).fake_with_rng(&mut self.rng);
                let budget = money(self.rng.gen_range(500.0..5000.0));
                let client_id = self.pick(client_ids);

                let bid_count = self.rng.gen_range(1..=5);
                let bids: Vec<Bid> = (0..bid_count)
                    .map(|_| {
                        let amount = money(self.rng.gen_range(budget * 0.5..=budget * 1.2));
                        Bid::new(self.pick(freelancer_ids), amount, self.sentence())
                    })
                    .collect();

                let status = Status::new(self.pick_str(&PROJECT_STATUSES));

                let mut reviews = ProjectReviews::default();
                if status.kind == Status::COMPLETED {
                    reviews.set(
                        ReviewKind::Client,
                        Review::new(self.rng.gen_range(1..=5), self.sentence()),
                    );
                    reviews.set(
                        ReviewKind::Freelancer,
                        Review::new(self.rng.gen_range(1..=5), self.sentence()),
                    );
                }

                let hired = match status.kind.as_str() {
                    Status::OPEN => None,
                    _ => bids.choose(&mut self.rng).map(|bid| bid.freelancer_id),
                };

                let mut project = Project::new(title, description, client_id, budget)
                    .with_embedded(bids, status, reviews);
                project.freelancer_id = hired;
                project
            })
            .collect()
    }

    fn payments(&mut self, projects: &[Project], freelancer_ids: &[ObjectId]) -> Vec<Payment> {
        projects
            .iter()
            .filter_map(|project| project.id.map(|id| (id, project)))
            .map(|(project_id, project)| {
                let freelancer_id = match project.freelancer_id {
                    Some(id) => id,
                    None => self.pick(freelancer_ids),
                };
                let amount = money(self.rng.gen_range(50.0..2000.0));

                let mut payment = Payment::new(project_id, project.client_id, freelancer_id, amount);
                payment.payment_status = self.pick_str(&PAYMENT_STATUSES);
                payment
            })
            .collect()
    }

    fn categories(&mut self, count: usize) -> Vec<Category> {
        (0..count)
            .map(|_| {
                let name: String = Industry().fake_with_rng(&mut self.rng);
                Category::new(name)
            })
            .collect()
    }
}

/// 로컬 파트에 실행 태그와 순번을 붙여 이메일이 겹치지 않게 합니다.
fn numbered_email(email: &str, run: &str, index: usize) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{}.{}.{}@{}", local, run, index, domain),
        None => format!("{}.{}.{}", email, run, index),
    }
}

/// 소수점 둘째 자리까지 반올림
fn money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use crate::domain::entities::Collection;
    use crate::services::CollectionService;
    use crate::store::memory::MemoryStore;

    fn service(store: &MemoryStore) -> SeedService {
        SeedService::new(Arc::new(store.clone())).with_bcrypt_cost(4)
    }

    async fn load_all<E: Entity>(store: &MemoryStore) -> Vec<E> {
        store
            .collection(E::COLLECTION.name())
            .find_all(None)
            .await
            .unwrap()
            .into_iter()
            .map(|document| E::from_document(document).unwrap())
            .collect()
    }

    #[actix_web::test]
    async fn test_seed_persists_count_records_per_collection() {
        let store = MemoryStore::new();

        let report = service(&store)
            .seed_with(3, StdRng::seed_from_u64(7))
            .await
            .unwrap();

        assert_eq!(report.counts.len(), Collection::ALL.len());
        assert_eq!(report.total(), 3 * Collection::ALL.len());
        for collection in Collection::ALL {
            assert_eq!(store.count(collection.name()), 3, "{}", collection);
        }
    }

    #[actix_web::test]
    async fn test_seeded_records_reference_seeded_ids() {
        let store = MemoryStore::new();
        service(&store)
            .seed_with(4, StdRng::seed_from_u64(11))
            .await
            .unwrap();

        let users: HashSet<ObjectId> = load_all::<User>(&store).await.iter().filter_map(|u| u.id).collect();
        let freelancers = load_all::<Freelancer>(&store).await;
        let freelancer_ids: HashSet<ObjectId> = freelancers.iter().filter_map(|f| f.id).collect();
        let client_ids: HashSet<ObjectId> =
            load_all::<Client>(&store).await.iter().filter_map(|c| c.id).collect();

        for freelancer in &freelancers {
            assert!(users.contains(&freelancer.user.unwrap()));
        }
        for project in load_all::<Project>(&store).await {
            assert!(client_ids.contains(&project.client_id));
            assert!(!project.bids().is_empty());
            for bid in project.bids() {
                assert!(freelancer_ids.contains(&bid.freelancer_id));
            }
        }
        for message in load_all::<Message>(&store).await {
            assert_eq!(message.participants.len(), 2);
            assert!(Uuid::parse_str(&message.conversation_id).is_ok());
        }
    }

    #[actix_web::test]
    async fn test_seeded_passwords_are_bcrypt_hashes() {
        let store = MemoryStore::new();
        service(&store)
            .seed_with(1, StdRng::seed_from_u64(3))
            .await
            .unwrap();

        let users = load_all::<User>(&store).await;

        assert!(users[0].password_hash.starts_with("$2"));
    }

    #[actix_web::test]
    async fn test_seed_respects_unique_email_indexes() {
        let store = MemoryStore::new();
        CollectionService::new(Arc::new(store.clone()))
            .provision()
            .await
            .unwrap();

        let report = service(&store)
            .seed_with(5, StdRng::seed_from_u64(5))
            .await
            .unwrap();

        assert_eq!(report.counts["Freelancers"], 5);
        assert_eq!(report.counts["Clients"], 5);
    }

    #[actix_web::test]
    async fn test_seed_rejects_count_out_of_range() {
        let store = MemoryStore::new();
        let request = SeedRequest { count: 0, seed: None };

        let result = service(&store).seed(&request).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(store.count("Users"), 0);
    }

    #[actix_web::test]
    async fn test_seed_failure_surfaces_persistence_error() {
        let store = MemoryStore::new();
        store.fail_writes(true);

        let result = service(&store)
            .seed_with(2, StdRng::seed_from_u64(1))
            .await;

        assert!(matches!(result, Err(AppError::PersistenceError(_))));
    }

    #[actix_web::test]
    async fn test_same_seed_twice_on_provisioned_store() {
        let store = MemoryStore::new();
        CollectionService::new(Arc::new(store.clone()))
            .provision()
            .await
            .unwrap();
        let request = SeedRequest { count: 2, seed: Some(42) };

        service(&store).seed(&request).await.unwrap();
        let second = service(&store).seed(&request).await.unwrap();

        assert_eq!(second.total(), 2 * Collection::ALL.len());
        assert_eq!(store.count("Users"), 4);
        assert_eq!(store.count("Freelancers"), 4);
        assert_eq!(store.count("Clients"), 4);
    }

    #[test]
    fn test_same_seed_generates_same_names() {
        let mut first = FakeRecords::new(StdRng::seed_from_u64(42), run_tag());
        let mut second = FakeRecords::new(StdRng::seed_from_u64(42), run_tag());

        let first: Vec<String> = first.users(3).0.into_iter().map(|u| u.name).collect();
        let second: Vec<String> = second.users(3).0.into_iter().map(|u| u.name).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_numbered_email() {
        assert_eq!(numbered_email("jane@example.com", "a1b2c3d4", 3), "jane.a1b2c3d4.3@example.com");
        assert_eq!(numbered_email("invalid", "a1b2c3d4", 1), "invalid.a1b2c3d4.1");
    }

    #[test]
    fn test_run_tags_differ() {
        assert_eq!(run_tag().len(), 8);
        assert_ne!(run_tag(), run_tag());
    }

    #[actix_web::test]
    async fn test_hash_passwords_off_the_worker() {
        let hashes = hash_passwords(vec!["secret".to_string(), "hunter2".to_string()], 4)
            .await
            .unwrap();

        assert_eq!(hashes.len(), 2);
        assert!(bcrypt::verify("secret", &hashes[0]).unwrap());
    }

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money(12.3456), 12.35);
        assert_eq!(money(100.0), 100.0);
    }
}
