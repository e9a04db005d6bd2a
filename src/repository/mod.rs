pub mod fragrance_repo;
pub mod lead_repo;
pub mod metadata_repo;
pub mod mongo;
pub mod quiz_repo;
pub mod repository_error;
pub mod settings_repo;
