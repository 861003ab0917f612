use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::collections::BTreeMap;
use url::form_urlencoded;

use crate::{
    errors::ServiceError,
    vnpay::{VNP_SECURE_HASH, VNP_SECURE_HASH_TYPE},
};

type HmacSha512 = Hmac<Sha512>;

/// Form-urlencodes `params` in key order, which is the string VNPay signs.
pub fn encode_params(params: &BTreeMap<String, String>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Hex HMAC-SHA512 of the encoded params, skipping any hash fields.
pub fn sign_params(secret: &str, params: &BTreeMap<String, String>) -> Result<String, ServiceError> {
    let signable: BTreeMap<String, String> = params
        .iter()
        .filter(|(key, _)| key.as_str() != VNP_SECURE_HASH && key.as_str() != VNP_SECURE_HASH_TYPE)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|e| ServiceError::Internal(format!("Invalid VNPay secret: {e}")))?;
    mac.update(encode_params(&signable).as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Checks the `vnp_SecureHash` carried in a callback query.
pub fn verify_params(secret: &str, params: &BTreeMap<String, String>) -> bool {
    let Some(received) = params.get(VNP_SECURE_HASH) else {
        return false;
    };

    match sign_params(secret, params) {
        Ok(expected) => expected.eq_ignore_ascii_case(received),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("vnp_TxnRef".to_string(), "OD123".to_string()),
            ("vnp_Amount".to_string(), "15000000".to_string()),
            ("vnp_OrderInfo".to_string(), "Thanh toan don hang OD123".to_string()),
        ])
    }

    #[test]
    fn encoding_is_sorted_and_form_style() {
        assert_eq!(
            encode_params(&params()),
            "vnp_Amount=15000000&vnp_OrderInfo=Thanh+toan+don+hang+OD123&vnp_TxnRef=OD123"
        );
    }

    #[test]
    fn signature_is_hex_sha512() {
        let hash = sign_params("secret", &params()).unwrap();
        assert_eq!(hash.len(), 128);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signed_params_verify() {
        let mut query = params();
        let hash = sign_params("secret", &query).unwrap();
        query.insert(VNP_SECURE_HASH.to_string(), hash.to_uppercase());
        query.insert(VNP_SECURE_HASH_TYPE.to_string(), "HmacSHA512".to_string());

        assert!(verify_params("secret", &query));
    }

    #[test]
    fn tampered_params_fail() {
        let mut query = params();
        let hash = sign_params("secret", &query).unwrap();
        query.insert(VNP_SECURE_HASH.to_string(), hash);
        query.insert("vnp_Amount".to_string(), "100".to_string());

        assert!(!verify_params("secret", &query));
    }

    #[test]
    fn wrong_secret_or_missing_hash_fails() {
        let mut query = params();
        assert!(!verify_params("secret", &query));

        let hash = sign_params("other", &query).unwrap();
        query.insert(VNP_SECURE_HASH.to_string(), hash);
        assert!(!verify_params("secret", &query));
    }
}
