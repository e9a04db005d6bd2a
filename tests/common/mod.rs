#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use bson::oid::ObjectId;
use serde_json::Value;
use tower::ServiceExt;

use essence_kiosk::app::{App, Repositories};
use essence_kiosk::config::{AppConfig, JwtConfig, KioskConfig};
use essence_kiosk::model::fragrance::Fragrance;
use essence_kiosk::model::lead::{ContactDetails, Lead};
use essence_kiosk::model::metadata::{MetadataCategory, MetadataDocument};
use essence_kiosk::model::quiz::Quiz;
use essence_kiosk::model::settings::{Settings, SettingsUpdate};
use essence_kiosk::repository::fragrance_repo::FragranceRepository;
use essence_kiosk::repository::lead_repo::LeadRepository;
use essence_kiosk::repository::metadata_repo::MetadataRepository;
use essence_kiosk::repository::quiz_repo::QuizRepository;
use essence_kiosk::repository::repository_error::{RepositoryError, RepositoryResult};
use essence_kiosk::repository::settings_repo::SettingsRepository;

fn missing(id: &ObjectId) -> RepositoryError {
    RepositoryError::not_found(format!("No document {}", id))
}

#[derive(Default)]
pub struct MemoryFragranceRepository {
    pub items: Mutex<Vec<Fragrance>>,
}

#[async_trait]
impl FragranceRepository for MemoryFragranceRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Fragrance>> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Fragrance>> {
        Ok(self.items.lock().unwrap().iter().find(|f| f.id.as_ref() == Some(id)).cloned())
    }

    async fn insert(&self, mut fragrance: Fragrance) -> RepositoryResult<Fragrance> {
        fragrance.id = Some(ObjectId::new());
        self.items.lock().unwrap().push(fragrance.clone());
        Ok(fragrance)
    }

    async fn insert_many(&self, fragrances: Vec<Fragrance>) -> RepositoryResult<usize> {
        let count = fragrances.len();
        for fragrance in fragrances {
            self.insert(fragrance).await?;
        }
        Ok(count)
    }

    async fn update(&self, id: &ObjectId, mut fragrance: Fragrance) -> RepositoryResult<Fragrance> {
        let mut items = self.items.lock().unwrap();
        let slot = items.iter_mut().find(|f| f.id.as_ref() == Some(id)).ok_or_else(|| missing(id))?;
        fragrance.id = Some(*id);
        *slot = fragrance.clone();
        Ok(fragrance)
    }

    async fn set_in_stock(&self, id: &ObjectId, in_stock: bool) -> RepositoryResult<()> {
        let mut items = self.items.lock().unwrap();
        let slot = items.iter_mut().find(|f| f.id.as_ref() == Some(id)).ok_or_else(|| missing(id))?;
        slot.in_stock = in_stock;
        Ok(())
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|f| f.id.as_ref() != Some(id));
        if items.len() == before {
            return Err(missing(id));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[ObjectId]) -> RepositoryResult<u64> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|f| !f.id.is_some_and(|id| ids.contains(&id)));
        Ok((before - items.len()) as u64)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.items.lock().unwrap().len() as u64)
    }
}

#[derive(Default)]
pub struct MemoryQuizRepository {
    pub items: Mutex<Vec<Quiz>>,
}

#[async_trait]
impl QuizRepository for MemoryQuizRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Quiz>> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Quiz>> {
        Ok(self.items.lock().unwrap().iter().find(|q| q.id.as_ref() == Some(id)).cloned())
    }

    async fn insert(&self, mut quiz: Quiz) -> RepositoryResult<Quiz> {
        quiz.id = Some(ObjectId::new());
        self.items.lock().unwrap().push(quiz.clone());
        Ok(quiz)
    }

    async fn update(&self, id: &ObjectId, mut quiz: Quiz) -> RepositoryResult<Quiz> {
        let mut items = self.items.lock().unwrap();
        let slot = items.iter_mut().find(|q| q.id.as_ref() == Some(id)).ok_or_else(|| missing(id))?;
        quiz.id = Some(*id);
        *slot = quiz.clone();
        Ok(quiz)
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|q| q.id.as_ref() != Some(id));
        if items.len() == before {
            return Err(missing(id));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[ObjectId]) -> RepositoryResult<u64> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|q| !q.id.is_some_and(|id| ids.contains(&id)));
        Ok((before - items.len()) as u64)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.items.lock().unwrap().len() as u64)
    }
}

#[derive(Default)]
pub struct MemoryLeadRepository {
    pub items: Mutex<Vec<Lead>>,
}

impl MemoryLeadRepository {
    fn with_lead<R>(&self, id: &ObjectId, f: impl FnOnce(&mut Lead) -> R) -> RepositoryResult<R> {
        let mut items = self.items.lock().unwrap();
        let lead = items.iter_mut().find(|l| l.id.as_ref() == Some(id)).ok_or_else(|| missing(id))?;
        Ok(f(lead))
    }
}

#[async_trait]
impl LeadRepository for MemoryLeadRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Lead>> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Lead>> {
        Ok(self.items.lock().unwrap().iter().find(|l| l.id.as_ref() == Some(id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Lead>> {
        Ok(self.items.lock().unwrap().iter().find(|l| l.email == email).cloned())
    }

    async fn insert(&self, mut lead: Lead) -> RepositoryResult<Lead> {
        let mut items = self.items.lock().unwrap();
        if items.iter().any(|l| l.email == lead.email) {
            return Err(RepositoryError::already_exists(format!("Duplicate key: {}", lead.email)));
        }
        lead.id = Some(ObjectId::new());
        items.push(lead.clone());
        Ok(lead)
    }

    async fn update_contact(&self, id: &ObjectId, contact: &ContactDetails, quiz_result: Option<&str>) -> RepositoryResult<()> {
        self.with_lead(id, |lead| {
            if let Some(result) = quiz_result {
                lead.quiz_result = result.to_string();
            }
            lead.first_name = contact.first_name.clone();
            lead.last_name = contact.last_name.clone();
            lead.email = contact.email.clone();
            lead.phone = contact.phone.clone();
        })
    }

    async fn touch(&self, id: &ObjectId, timestamp: &str) -> RepositoryResult<()> {
        self.with_lead(id, |lead| lead.timestamp = Some(timestamp.to_string()))
    }

    async fn add_to_wishlist(&self, id: &ObjectId, fragrance_id: &ObjectId) -> RepositoryResult<()> {
        self.with_lead(id, |lead| {
            if !lead.wishlist.contains(fragrance_id) {
                lead.wishlist.push(*fragrance_id);
            }
        })
    }

    async fn remove_from_wishlist(&self, id: &ObjectId, fragrance_id: &ObjectId) -> RepositoryResult<()> {
        self.with_lead(id, |lead| lead.wishlist.retain(|f| f != fragrance_id))
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<()> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|l| l.id.as_ref() != Some(id));
        if items.len() == before {
            return Err(missing(id));
        }
        Ok(())
    }

    async fn delete_many(&self, ids: &[ObjectId]) -> RepositoryResult<u64> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|l| !l.id.is_some_and(|id| ids.contains(&id)));
        Ok((before - items.len()) as u64)
    }
}

/// Settings store that can be switched into a failing state.
#[derive(Default)]
pub struct MemorySettingsRepository {
    pub document: Mutex<Option<Settings>>,
    pub failing: AtomicBool,
}

impl MemorySettingsRepository {
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl SettingsRepository for MemorySettingsRepository {
    async fn get(&self) -> RepositoryResult<Option<Settings>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::database("store offline"));
        }
        Ok(self.document.lock().unwrap().clone())
    }

    async fn merge(&self, update: &SettingsUpdate) -> RepositoryResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::database("store offline"));
        }
        let mut document = self.document.lock().unwrap();
        let mut settings = document.clone().unwrap_or_default();
        settings.apply(update);
        *document = Some(settings);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryMetadataRepository {
    pub docs: Mutex<Vec<MetadataDocument>>,
}

#[async_trait]
impl MetadataRepository for MemoryMetadataRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<MetadataDocument>> {
        Ok(self.docs.lock().unwrap().clone())
    }

    async fn find(&self, category: MetadataCategory) -> RepositoryResult<Option<MetadataDocument>> {
        Ok(self.docs.lock().unwrap().iter().find(|d| d.id == category.as_str()).cloned())
    }

    async fn save_values(&self, category: MetadataCategory, values: &[String]) -> RepositoryResult<()> {
        let mut docs = self.docs.lock().unwrap();
        match docs.iter_mut().find(|d| d.id == category.as_str()) {
            Some(doc) => doc.values = values.to_vec(),
            None => docs.push(MetadataDocument { id: category.as_str().to_string(), values: values.to_vec() }),
        }
        Ok(())
    }
}

pub struct Stores {
    pub fragrances: Arc<MemoryFragranceRepository>,
    pub quizzes: Arc<MemoryQuizRepository>,
    pub leads: Arc<MemoryLeadRepository>,
    pub settings: Arc<MemorySettingsRepository>,
    pub metadata: Arc<MemoryMetadataRepository>,
}

impl Stores {
    pub fn new() -> Self {
        Stores {
            fragrances: Arc::default(),
            quizzes: Arc::default(),
            leads: Arc::default(),
            settings: Arc::default(),
            metadata: Arc::default(),
        }
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            fragrances: self.fragrances.clone(),
            quizzes: self.quizzes.clone(),
            leads: self.leads.clone(),
            settings: self.settings.clone(),
            metadata: self.metadata.clone(),
        }
    }

    pub fn set_settings(&self, settings: Settings) {
        *self.settings.document.lock().unwrap() = Some(settings);
    }
}

pub const TEST_PIN: &str = "4321";

/// A seeded app over in-memory stores.
pub async fn test_app(settings: Settings) -> (App, Stores) {
    let stores = Stores::new();
    stores.set_settings(settings);
    let app = App::build(
        AppConfig { host: "127.0.0.1".to_string(), port: 0 },
        JwtConfig::default(),
        KioskConfig::default(),
        stores.repositories(),
    );
    app.seed().await.expect("seed");
    (app, stores)
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, value)
}

/// Hex id out of an extended-JSON ObjectId (`{"$oid": "..."}`).
pub fn oid(value: &Value) -> String {
    value["$oid"].as_str().expect("object id").to_string()
}
