use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

const CODE_CHARACTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const SLUG_CHARACTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn seeded_rng() -> Result<StdRng> {
    let mut seed = [0u8; 32];
    OsRng.try_fill_bytes(&mut seed)?;
    Ok(StdRng::from_seed(seed))
}

fn pick(rng: &mut StdRng, alphabet: &[u8], length: usize) -> String {
    (0..length)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
        .collect()
}

/// Short lower-case suffix appended to a slug that is already taken.
pub fn generate_slug_suffix() -> Result<String> {
    Ok(pick(&mut seeded_rng()?, SLUG_CHARACTERS, 6))
}

/// Six-digit password reset code.
pub fn generate_otp() -> Result<String> {
    let code: u32 = seeded_rng()?.random_range(0..1_000_000);
    Ok(format!("{code:06}"))
}

/// Public order reference such as `OD240615K7QZ2M`.
pub fn generate_order_code(now: DateTime<Utc>) -> Result<String> {
    let suffix = pick(&mut seeded_rng()?, CODE_CHARACTERS, 6);
    Ok(format!("OD{}{suffix}", now.format("%y%m%d")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..50 {
            let otp = generate_otp().unwrap();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn order_code_embeds_date() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 8, 0, 0).unwrap();
        let code = generate_order_code(now).unwrap();
        assert!(code.starts_with("OD240615"));
        assert_eq!(code.len(), 14);
    }
}
