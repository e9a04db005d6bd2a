pub mod analytics_service;
pub mod fragrance_service;
pub mod lead_service;
pub mod metadata_service;
pub mod quiz_service;
pub mod seed_service;
pub mod settings_service;
