pub mod admin_handler;
pub mod catalog_handler;
pub mod kiosk_handler;
pub mod quiz_handler;
pub mod session_handler;
