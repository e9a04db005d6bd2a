use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::fragrance::{Fragrance, Gender, Intensity, NotePyramid};
use crate::service::fragrance_service::FragranceFilters;

/// `GET /fragrances/search` query; list values are comma separated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub occasion: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn split_list(raw: &Option<String>) -> Vec<String> {
    raw.as_deref()
        .map(|s| s.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect())
        .unwrap_or_default()
}

impl SearchParams {
    pub fn into_search(self) -> Result<SearchRequest, String> {
        let gender = split_list(&self.gender)
            .iter()
            .map(|g| match g.to_ascii_lowercase().as_str() {
                "masculine" => Ok(Gender::Masculine),
                "feminine" => Ok(Gender::Feminine),
                "unisex" => Ok(Gender::Unisex),
                other => Err(format!("Unknown gender: {}", other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SearchRequest {
            query: self.q.clone().unwrap_or_default(),
            filters: FragranceFilters {
                gender,
                vendor: split_list(&self.vendor),
                occasion: split_list(&self.occasion),
                notes: split_list(&self.notes),
            },
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub filters: FragranceFilters,
}

/// Body of the create and edit inventory forms.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FragranceRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub vendor: String,
    pub gender: Gender,
    #[serde(default)]
    pub occasion: Vec<String>,
    #[serde(default)]
    pub notes: NotePyramid,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[serde(default)]
    pub personality: Vec<String>,
    pub intensity: Intensity,
    #[serde(default)]
    #[validate(url)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub shelf_location: String,
}

fn default_true() -> bool {
    true
}

impl From<FragranceRequest> for Fragrance {
    fn from(req: FragranceRequest) -> Self {
        Fragrance {
            id: None,
            name: req.name.trim().to_string(),
            vendor: req.vendor.trim().to_string(),
            gender: req.gender,
            occasion: req.occasion,
            notes: req.notes,
            description: req.description,
            personality: req.personality,
            intensity: req.intensity,
            image: req.image,
            in_stock: req.in_stock,
            shelf_location: req.shelf_location,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRequest {
    pub in_stock: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_lists_are_split() {
        let params = SearchParams {
            q: Some("noir".to_string()),
            gender: Some("Unisex, feminine".to_string()),
            occasion: Some("Evening,,Formal".to_string()),
            ..SearchParams::default()
        };
        let search = params.into_search().unwrap();
        assert_eq!(search.query, "noir");
        assert_eq!(search.filters.gender, vec![Gender::Unisex, Gender::Feminine]);
        assert_eq!(search.filters.occasion, vec!["Evening", "Formal"]);
        assert!(search.filters.vendor.is_empty());
    }

    #[test]
    fn test_unknown_gender_rejected() {
        let params = SearchParams { gender: Some("robot".to_string()), ..SearchParams::default() };
        assert!(params.into_search().is_err());
    }

    #[test]
    fn test_request_defaults_in_stock() {
        let req: FragranceRequest = serde_json::from_value(serde_json::json!({
            "name": "Test", "vendor": "House", "gender": "unisex", "intensity": "light"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert!(Fragrance::from(req).in_stock);
    }
}
