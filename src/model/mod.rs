pub mod fragrance;
pub mod lead;
pub mod metadata;
pub mod quiz;
pub mod seed;
pub mod settings;
