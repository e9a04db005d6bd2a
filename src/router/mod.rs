pub mod admin_router;
pub mod catalog_router;
pub mod kiosk_router;
pub mod quiz_router;
pub mod session_router;
