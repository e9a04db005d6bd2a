use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponStatus {
    Active,
    Redeemed,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    pub discount: String,
    /// Calendar date, `YYYY-MM-DD`
    pub expiry_date: String,
    pub status: CouponStatus,
}

/// A shopper who identified themselves at the kiosk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub quiz_result: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub wishlist: Vec<ObjectId>,
    #[serde(default)]
    pub coupons: Vec<Coupon>,
}

impl Lead {
    pub fn has_in_wishlist(&self, fragrance_id: &ObjectId) -> bool {
        self.wishlist.contains(fragrance_id)
    }
}

/// The editable identity fields of a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}
