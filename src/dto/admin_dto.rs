use serde::Deserialize;
use validator::Validate;

use crate::dto::contact_dto::{validate_person_name, validate_us_phone};
use crate::model::lead::ContactDetails;
use crate::model::metadata::MetadataCategory;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UnlockRequest {
    #[validate(length(max = 32))]
    #[serde(default)]
    pub pin: String,
}

/// Ids are the hex form of the documents' ObjectIds.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BatchDeleteRequest {
    #[validate(length(min = 1, max = 500))]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MetadataItemRequest {
    pub category: MetadataCategory,
    #[validate(length(min = 1, max = 80))]
    pub item: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MetadataRenameRequest {
    pub category: MetadataCategory,
    #[validate(length(min = 1, max = 80))]
    pub from: String,
    #[validate(length(min = 1, max = 80))]
    pub to: String,
}

/// Dashboard lead form; same rules as the kiosk contact form plus the quiz result.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    #[validate(custom(function = "validate_person_name"))]
    pub first_name: String,
    #[validate(custom(function = "validate_person_name"))]
    pub last_name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "validate_us_phone"))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub quiz_result: Option<String>,
}

impl LeadRequest {
    pub fn into_parts(self) -> (ContactDetails, Option<String>) {
        let contact = ContactDetails {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
        };
        (contact, self.quiz_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_request_keeps_quiz_result() {
        let req: LeadRequest = serde_json::from_value(serde_json::json!({
            "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com", "quizResult": "Citrus Dawn"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        let (contact, quiz_result) = req.into_parts();
        assert_eq!(contact.email, "ada@example.com");
        assert_eq!(quiz_result.as_deref(), Some("Citrus Dawn"));
    }

    #[test]
    fn test_lead_request_applies_contact_rules() {
        let req: LeadRequest = serde_json::from_value(serde_json::json!({
            "firstName": "R2D2", "lastName": "Droid", "email": "nope"
        }))
        .unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
        assert!(errors.field_errors().contains_key("email"));
    }
}
