mod common;

use std::sync::Arc;

use common::{test_app, Stores};
use essence_kiosk::config::KioskConfig;
use essence_kiosk::model::lead::ContactDetails;
use essence_kiosk::model::metadata::MetadataCategory;
use essence_kiosk::model::settings::{Settings, SettingsUpdate};
use essence_kiosk::service::fragrance_service::FragranceServiceImpl;
use essence_kiosk::service::lead_service::{LeadService, LeadServiceImpl};
use essence_kiosk::service::metadata_service::{MetadataService, MetadataServiceImpl};
use essence_kiosk::service::seed_service::seed_if_empty;
use essence_kiosk::service::settings_service::{SettingsService, SettingsServiceImpl};
use essence_kiosk::session::SessionStore;
use essence_kiosk::util::error::ServiceError;

fn contact(email: &str) -> ContactDetails {
    ContactDetails {
        first_name: " Ada ".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        phone: String::new(),
    }
}

fn lead_service(stores: &Stores, session: Arc<SessionStore>) -> LeadServiceImpl {
    let metadata = Arc::new(MetadataServiceImpl::new(stores.metadata.clone()));
    let fragrances = Arc::new(FragranceServiceImpl::new(stores.fragrances.clone(), metadata));
    LeadServiceImpl::new(stores.leads.clone(), fragrances, session, KioskConfig::default())
}

#[tokio::test]
async fn test_seed_fills_empty_store_once() {
    let stores = Stores::new();
    let metadata = MetadataServiceImpl::new(stores.metadata.clone());

    let first = seed_if_empty(
        stores.fragrances.as_ref(),
        stores.quizzes.as_ref(),
        stores.metadata.as_ref(),
        &metadata,
    )
    .await
    .unwrap();
    assert_eq!(first.fragrances, 6);
    assert_eq!(first.quizzes, 1);
    assert!(first.metadata);
    assert_eq!(stores.metadata.docs.lock().unwrap().len(), 4);

    let second = seed_if_empty(
        stores.fragrances.as_ref(),
        stores.quizzes.as_ref(),
        stores.metadata.as_ref(),
        &metadata,
    )
    .await
    .unwrap();
    assert_eq!(second.fragrances, 0);
    assert_eq!(second.quizzes, 0);
    assert!(!second.metadata);
    assert_eq!(stores.fragrances.items.lock().unwrap().len(), 6);
}

#[tokio::test]
async fn test_settings_fall_back_to_defaults_when_store_fails() {
    let stores = Stores::new();
    stores.set_settings(Settings { timeout_seconds: 300, ..Settings::default() });
    let service = SettingsServiceImpl::new(stores.settings.clone());

    assert_eq!(service.get().await.timeout_seconds, 300);
    stores.settings.fail(true);
    assert_eq!(service.get().await, Settings::default());
    assert!(service.fetch().await.is_err());
}

#[tokio::test]
async fn test_refresh_publishes_changes_only() {
    let stores = Stores::new();
    stores.set_settings(Settings { timeout_seconds: 45, ..Settings::default() });
    let service = SettingsServiceImpl::new(stores.settings.clone());
    let mut watcher = service.subscribe();
    assert!(!watcher.borrow().timeout_enabled);

    assert!(service.refresh().await);
    assert!(watcher.has_changed().unwrap());
    assert_eq!(watcher.borrow_and_update().timeout_seconds, 45);

    assert!(service.refresh().await);
    assert!(!watcher.has_changed().unwrap());

    stores.settings.fail(true);
    assert!(!service.refresh().await);
    assert_eq!(watcher.borrow().timeout_seconds, 45);
}

#[tokio::test]
async fn test_settings_update_rejects_bad_values() {
    let stores = Stores::new();
    let service = SettingsServiceImpl::new(stores.settings.clone());

    let zero = SettingsUpdate { timeout_seconds: Some(0), ..SettingsUpdate::default() };
    assert!(matches!(service.update(zero).await, Err(ServiceError::InvalidInput(_))));
    let blank = SettingsUpdate { admin_pin: Some("  ".to_string()), ..SettingsUpdate::default() };
    assert!(matches!(service.update(blank).await, Err(ServiceError::InvalidInput(_))));

    let saved = service
        .update(SettingsUpdate { pin_enabled: Some(true), ..SettingsUpdate::default() })
        .await
        .unwrap();
    assert!(saved.pin_enabled);
    assert!(service.verify_pin("1234").await.is_ok());
    assert!(matches!(service.verify_pin("9999").await, Err(ServiceError::Unauthorized(_))));

    let huge = SettingsUpdate { timeout_seconds: Some(86_401), ..SettingsUpdate::default() };
    assert!(matches!(service.update(huge).await, Err(ServiceError::InvalidInput(_))));
}

#[tokio::test]
async fn test_pin_check_fails_closed_on_store_error() {
    let stores = Stores::new();
    stores.set_settings(Settings::default());
    let service = SettingsServiceImpl::new(stores.settings.clone());
    assert!(service.verify_pin("anything").await.is_ok());

    stores.settings.fail(true);
    assert!(matches!(service.verify_pin("anything").await, Err(ServiceError::InternalError(_))));
    assert!(matches!(service.verify_pin("1234").await, Err(ServiceError::InternalError(_))));
}

#[tokio::test]
async fn test_dashboard_lead_does_not_sign_in() {
    let stores = Stores::new();
    let session = Arc::new(SessionStore::new());
    let service = lead_service(&stores, session.clone());

    let created = service.create(contact("staff@example.com"), Some(" Urban Woods ".to_string())).await.unwrap();
    assert_eq!(created.quiz_result, "Urban Woods");
    assert_eq!(created.coupons.len(), 1);
    assert!(session.get_user().is_none());
}

#[tokio::test]
async fn test_identify_logs_in_existing_lead_without_overwriting() {
    let stores = Stores::new();
    let session = Arc::new(SessionStore::new());
    let service = lead_service(&stores, session.clone());

    let created = service.identify(contact("ada@example.com"), Some("Velvet Rose".to_string())).await.unwrap();
    assert_eq!(created.first_name, "Ada");
    assert_eq!(created.quiz_result, "Velvet Rose");
    session.clear();

    let again = service.identify(contact("ada@example.com"), Some("Citrus Dawn".to_string())).await.unwrap();
    assert_eq!(again.id, created.id);
    assert_eq!(again.quiz_result, "Velvet Rose");
    assert_eq!(again.coupons.len(), 1);
    assert_eq!(session.get_user().unwrap().id, created.id);
}

#[tokio::test]
async fn test_duplicate_email_is_a_conflict() {
    let stores = Stores::new();
    let service = lead_service(&stores, Arc::new(SessionStore::new()));
    service.save_lead(contact("dup@example.com"), None).await.unwrap();
    let err = service.save_lead(contact("dup@example.com"), None).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn test_deleting_session_lead_clears_session() {
    let stores = Stores::new();
    let session = Arc::new(SessionStore::new());
    let service = lead_service(&stores, session.clone());
    let lead = service.save_lead(contact("gone@example.com"), None).await.unwrap();
    assert!(session.get_user().is_some());

    service.delete(&lead.id.unwrap()).await.unwrap();
    assert!(session.get_user().is_none());
    assert!(stores.leads.items.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_wishlist_skips_removed_fragrances() {
    let (app, stores) = test_app(Settings::default()).await;
    let service = lead_service(&stores, app.session.clone());
    let lead = service.save_lead(contact("wish@example.com"), None).await.unwrap();
    let lead_id = lead.id.unwrap();
    let ids: Vec<_> = stores.fragrances.items.lock().unwrap().iter().filter_map(|f| f.id).take(2).collect();

    for id in &ids {
        service.toggle_wishlist(&lead_id, id).await.unwrap();
    }
    stores.fragrances.items.lock().unwrap().retain(|f| f.id != Some(ids[0]));

    let items = service.wishlist_items(&lead_id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, Some(ids[1]));
    // The dangling id stays on the lead.
    assert_eq!(stores.leads.items.lock().unwrap()[0].wishlist.len(), 2);

    let remaining = service.toggle_wishlist(&lead_id, &ids[0]).await.unwrap();
    assert_eq!(remaining, vec![ids[1]]);
    let missing = bson::oid::ObjectId::new();
    assert!(matches!(service.toggle_wishlist(&lead_id, &missing).await, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_metadata_vocabulary_edits() {
    let stores = Stores::new();
    let service = MetadataServiceImpl::new(stores.metadata.clone());

    let values = service.add_item(MetadataCategory::Vendors, " Zara ").await.unwrap();
    assert_eq!(values, vec!["Zara"]);
    let values = service.add_item(MetadataCategory::Vendors, "Acqua").await.unwrap();
    assert_eq!(values, vec!["Acqua", "Zara"]);
    assert!(service.add_item(MetadataCategory::Vendors, "   ").await.is_err());

    let values = service.remove_item(MetadataCategory::Vendors, "Missing").await.unwrap();
    assert_eq!(values.len(), 2);
    let values = service.rename_item(MetadataCategory::Vendors, "Zara", "Byredo").await.unwrap();
    assert_eq!(values, vec!["Acqua", "Byredo"]);

    let all = service.get_all().await;
    assert_eq!(all.vendors, vec!["Acqua", "Byredo"]);
    assert!(all.notes.is_empty());
}

#[tokio::test]
async fn test_metadata_defaults_when_empty() {
    let stores = Stores::new();
    let service = MetadataServiceImpl::new(stores.metadata.clone());
    let all = service.get_all().await;
    assert!(all.vendors.contains(&"Dior".to_string()));
    assert!(all.personalities.windows(2).all(|w| w[0] <= w[1]));
}

