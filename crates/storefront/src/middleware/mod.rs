pub mod client_ip;
pub mod jwt;
pub mod rate_limit;
pub mod validate;
