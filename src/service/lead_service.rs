use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::{Duration, Utc};
use rand::Rng;
use tracing::{error, info, instrument, warn};

use crate::config::KioskConfig;
use crate::model::fragrance::Fragrance;
use crate::model::lead::{ContactDetails, Coupon, CouponStatus, Lead};
use crate::repository::lead_repo::LeadRepository;
use crate::service::fragrance_service::{FragranceService, FragranceServiceImpl};
use crate::session::SessionStore;
use crate::util::error::ServiceError;

pub const WELCOME_PREFIX: &str = "WELCOME";

/// A fresh `WELCOME<n>` coupon valid for `validity_days` from today (UTC).
pub fn welcome_coupon(discount: &str, validity_days: i64) -> Coupon {
    let n: u32 = rand::thread_rng().gen_range(0..1000);
    let expiry = Utc::now().date_naive() + Duration::days(validity_days);
    Coupon {
        code: format!("{}{}", WELCOME_PREFIX, n),
        discount: discount.to_string(),
        expiry_date: expiry.format("%Y-%m-%d").to_string(),
        status: CouponStatus::Active,
    }
}

#[async_trait]
pub trait LeadService: Send + Sync {
    async fn check_exists(&self, email: &str) -> Result<bool, ServiceError>;
    /// Starts a session for a known email. `None` when nobody uses it.
    async fn login(&self, email: &str) -> Result<Option<Lead>, ServiceError>;
    /// Captures a new lead and makes it the session user.
    async fn save_lead(&self, contact: ContactDetails, quiz_result: Option<String>) -> Result<Lead, ServiceError>;
    /// Captures a new lead from the dashboard; the kiosk session is left alone.
    async fn create(&self, contact: ContactDetails, quiz_result: Option<String>) -> Result<Lead, ServiceError>;
    /// Logs in when the email is known, otherwise captures a new lead.
    async fn identify(&self, contact: ContactDetails, quiz_result: Option<String>) -> Result<Lead, ServiceError>;
    async fn list(&self) -> Result<Vec<Lead>, ServiceError>;
    async fn get(&self, id: &ObjectId) -> Result<Lead, ServiceError>;
    /// Rewrites the contact fields, and `quizResult` when one is given.
    async fn update(&self, id: &ObjectId, contact: ContactDetails, quiz_result: Option<String>) -> Result<Lead, ServiceError>;
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError>;
    async fn delete_many(&self, ids: &[ObjectId]) -> Result<u64, ServiceError>;
    /// Adds the fragrance when absent, removes it when present; returns the new list.
    async fn toggle_wishlist(&self, lead_id: &ObjectId, fragrance_id: &ObjectId) -> Result<Vec<ObjectId>, ServiceError>;
    async fn wishlist_items(&self, lead_id: &ObjectId) -> Result<Vec<Fragrance>, ServiceError>;
    fn logout(&self);
}

pub struct LeadServiceImpl {
    pub lead_repo: Arc<dyn LeadRepository>,
    pub fragrance_service: Arc<FragranceServiceImpl>,
    pub session: Arc<SessionStore>,
    pub kiosk_config: KioskConfig,
}

impl LeadServiceImpl {
    pub fn new(
        lead_repo: Arc<dyn LeadRepository>,
        fragrance_service: Arc<FragranceServiceImpl>,
        session: Arc<SessionStore>,
        kiosk_config: KioskConfig,
    ) -> Self {
        Self { lead_repo, fragrance_service, session, kiosk_config }
    }

    #[instrument(skip(self, contact, quiz_result), fields(email = %contact.email))]
    async fn insert_lead(&self, contact: ContactDetails, quiz_result: Option<String>) -> Result<Lead, ServiceError> {
        let contact = clean_contact(contact);
        let lead = Lead {
            id: None,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            quiz_result: quiz_result.map(|r| r.trim().to_string()).unwrap_or_default(),
            timestamp: Some(Utc::now().to_rfc3339()),
            wishlist: Vec::new(),
            coupons: vec![welcome_coupon(&self.kiosk_config.coupon_discount, self.kiosk_config.coupon_validity_days)],
        };
        let inserted = self.lead_repo.insert(lead).await;
        match &inserted {
            Ok(_) => info!("Lead captured"),
            Err(e) => error!("Failed to capture lead: {e}"),
        }
        Ok(inserted?)
    }
}

fn clean_contact(mut contact: ContactDetails) -> ContactDetails {
    contact.first_name = contact.first_name.trim().to_string();
    contact.last_name = contact.last_name.trim().to_string();
    contact.email = contact.email.trim().to_string();
    contact.phone = contact.phone.trim().to_string();
    contact
}

#[async_trait]
impl LeadService for LeadServiceImpl {
    async fn check_exists(&self, email: &str) -> Result<bool, ServiceError> {
        Ok(self.lead_repo.find_by_email(email.trim()).await?.is_some())
    }

    #[instrument(skip(self), fields(email = %email))]
    async fn login(&self, email: &str) -> Result<Option<Lead>, ServiceError> {
        let Some(mut lead) = self.lead_repo.find_by_email(email.trim()).await? else {
            info!("No lead for this email");
            return Ok(None);
        };
        let now = Utc::now().to_rfc3339();
        if let Some(id) = lead.id {
            if let Err(e) = self.lead_repo.touch(&id, &now).await {
                warn!("Failed to refresh lead timestamp: {e}");
            } else {
                lead.timestamp = Some(now);
            }
        }
        info!("Lead logged in");
        self.session.set_user(Some(lead.clone()));
        Ok(Some(lead))
    }

    async fn save_lead(&self, contact: ContactDetails, quiz_result: Option<String>) -> Result<Lead, ServiceError> {
        let inserted = self.insert_lead(contact, quiz_result).await?;
        self.session.set_user(Some(inserted.clone()));
        Ok(inserted)
    }

    async fn create(&self, contact: ContactDetails, quiz_result: Option<String>) -> Result<Lead, ServiceError> {
        self.insert_lead(contact, quiz_result).await
    }

    async fn identify(&self, contact: ContactDetails, quiz_result: Option<String>) -> Result<Lead, ServiceError> {
        if let Some(lead) = self.login(&contact.email).await? {
            return Ok(lead);
        }
        self.save_lead(contact, quiz_result).await
    }

    async fn list(&self) -> Result<Vec<Lead>, ServiceError> {
        Ok(self.lead_repo.find_all().await?)
    }

    async fn get(&self, id: &ObjectId) -> Result<Lead, ServiceError> {
        self.lead_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Lead {} not found", id)))
    }

    #[instrument(skip(self, contact), fields(id = %id))]
    async fn update(&self, id: &ObjectId, contact: ContactDetails, quiz_result: Option<String>) -> Result<Lead, ServiceError> {
        let contact = clean_contact(contact);
        let quiz_result = quiz_result.map(|r| r.trim().to_string());
        self.lead_repo.update_contact(id, &contact, quiz_result.as_deref()).await?;
        let lead = self.get(id).await?;
        self.session.update_if(id, |current| {
            current.first_name = lead.first_name.clone();
            current.last_name = lead.last_name.clone();
            current.email = lead.email.clone();
            current.phone = lead.phone.clone();
            current.quiz_result = lead.quiz_result.clone();
        });
        Ok(lead)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> Result<(), ServiceError> {
        self.lead_repo.delete(id).await?;
        if self.session.get_user().is_some_and(|u| u.id.as_ref() == Some(id)) {
            self.session.clear();
        }
        Ok(())
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn delete_many(&self, ids: &[ObjectId]) -> Result<u64, ServiceError> {
        let deleted = self.lead_repo.delete_many(ids).await?;
        if self.session.get_user().is_some_and(|u| u.id.is_some_and(|id| ids.contains(&id))) {
            self.session.clear();
        }
        Ok(deleted)
    }

    #[instrument(skip(self), fields(lead = %lead_id, fragrance = %fragrance_id))]
    async fn toggle_wishlist(&self, lead_id: &ObjectId, fragrance_id: &ObjectId) -> Result<Vec<ObjectId>, ServiceError> {
        let lead = self.get(lead_id).await?;
        let mut wishlist = lead.wishlist;
        if wishlist.contains(fragrance_id) {
            self.lead_repo.remove_from_wishlist(lead_id, fragrance_id).await?;
            wishlist.retain(|id| id != fragrance_id);
            info!("Removed from wishlist");
        } else {
            if self.fragrance_service.fragrance_repo.find_by_id(fragrance_id).await?.is_none() {
                return Err(ServiceError::NotFound(format!("Fragrance {} not found", fragrance_id)));
            }
            self.lead_repo.add_to_wishlist(lead_id, fragrance_id).await?;
            wishlist.push(*fragrance_id);
            info!("Added to wishlist");
        }
        let updated = wishlist.clone();
        self.session.update_if(lead_id, move |current| current.wishlist = updated);
        Ok(wishlist)
    }

    async fn wishlist_items(&self, lead_id: &ObjectId) -> Result<Vec<Fragrance>, ServiceError> {
        let lead = self.get(lead_id).await?;
        Ok(self.fragrance_service.get_by_ids(&lead.wishlist).await)
    }

    fn logout(&self) {
        info!("Session ended");
        self.session.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_coupon_shape() {
        let coupon = welcome_coupon("10% OFF", 30);
        let n: u32 = coupon.code.strip_prefix(WELCOME_PREFIX).unwrap().parse().unwrap();
        assert!(n < 1000);
        assert_eq!(coupon.discount, "10% OFF");
        assert_eq!(coupon.status, CouponStatus::Active);
        let expected = (Utc::now().date_naive() + Duration::days(30)).format("%Y-%m-%d").to_string();
        assert_eq!(coupon.expiry_date, expected);
    }

    #[test]
    fn test_clean_contact_trims() {
        let contact = clean_contact(ContactDetails {
            first_name: " Ada ".to_string(),
            last_name: "Lovelace ".to_string(),
            email: " ada@example.com".to_string(),
            phone: String::new(),
        });
        assert_eq!(contact.first_name, "Ada");
        assert_eq!(contact.email, "ada@example.com");
    }
}
