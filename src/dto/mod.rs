pub mod admin_dto;
pub mod contact_dto;
pub mod fragrance_dto;
pub mod kiosk_dto;
pub mod quiz_dto;
