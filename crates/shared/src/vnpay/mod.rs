//! VNPay redirect payments: signing the outbound URL and checking the
//! callbacks VNPay sends back (browser return and IPN).

mod gateway;
mod signature;

pub use self::gateway::{IpnResponse, PaymentUrlParams, VnpayGateway, VnpayResult};
pub use self::signature::{encode_params, sign_params, verify_params};

pub const VNP_VERSION: &str = "2.1.0";
pub const VNP_SECURE_HASH: &str = "vnp_SecureHash";
pub const VNP_SECURE_HASH_TYPE: &str = "vnp_SecureHashType";

/// Minutes a payment link stays valid.
pub const PAYMENT_EXPIRE_MINUTES: i64 = 15;
