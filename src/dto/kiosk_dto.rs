use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationAction {
    Push,
    Replace,
    Back,
}

/// Reported by the frontend whenever its router moves.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NavigateRequest {
    pub action: NavigationAction,
    #[serde(default)]
    #[validate(custom(function = "validate_route"))]
    pub path: Option<String>,
}

fn validate_route(path: &str) -> Result<(), validator::ValidationError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(validator::ValidationError::new("route"))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteResponse {
    pub path: String,
}
