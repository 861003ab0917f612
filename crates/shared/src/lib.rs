pub mod abstract_trait;
pub mod cache;
pub mod config;
pub mod di;
pub mod domain;
pub mod errors;
pub mod model;
pub mod pricing;
pub mod repository;
pub mod service;
pub mod state;
pub mod utils;
pub mod vnpay;
