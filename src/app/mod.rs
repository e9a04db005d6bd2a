pub mod app;

pub use app::{App, AppError, Repositories};
