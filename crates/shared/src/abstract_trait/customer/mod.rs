mod repository;
mod service;

pub use self::repository::*;
pub use self::service::*;
