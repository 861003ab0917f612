use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::status::{DiscountType, RecordStatus},
    errors::ServiceError,
    model::Promotion,
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PromotionQuote {
    pub promotion_id: i32,
    pub code: String,
    pub sub_total: i64,
    pub discount: i64,
    pub total: i64,
}

/// Works out what `promotion` takes off an order of `sub_total` at `now`.
///
/// The code must be live, inside its date window (both ends inclusive) and
/// the order must reach the minimum value. The discount never exceeds the
/// sub-total.
pub fn evaluate_promotion(
    promotion: &Promotion,
    sub_total: i64,
    now: NaiveDateTime,
) -> Result<PromotionQuote, ServiceError> {
    if promotion.deleted_at.is_some() || promotion.status != RecordStatus::Active.as_str() {
        return Err(ServiceError::InvalidOrder(format!(
            "Promotion {} is not active",
            promotion.code
        )));
    }

    if now < promotion.start_date || now > promotion.end_date {
        return Err(ServiceError::InvalidOrder(format!(
            "Promotion {} is not valid at this time",
            promotion.code
        )));
    }

    if sub_total < promotion.min_order_value {
        return Err(ServiceError::InvalidOrder(format!(
            "Promotion {} requires a minimum order of {}",
            promotion.code, promotion.min_order_value
        )));
    }

    let discount = match promotion.discount_type.parse::<DiscountType>()? {
        DiscountType::Percent => {
            (sub_total as f64 * promotion.discount_value as f64 / 100.0).round() as i64
        }
        DiscountType::Amount => promotion.discount_value,
    }
    .clamp(0, sub_total);

    Ok(PromotionQuote {
        promotion_id: promotion.promotion_id,
        code: promotion.code.clone(),
        sub_total,
        discount,
        total: sub_total - discount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn promotion(discount_type: &str, value: i64, min_order_value: i64) -> Promotion {
        Promotion {
            promotion_id: 9,
            code: "SUMMER".into(),
            description: None,
            discount_type: discount_type.into(),
            discount_value: value,
            min_order_value,
            start_date: now() - Duration::days(1),
            end_date: now() + Duration::days(1),
            status: "active".into(),
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn percent_discount_is_rounded() {
        let quote = evaluate_promotion(&promotion("percent", 15, 0), 99_999, now()).unwrap();

        assert_eq!(quote.discount, 15_000);
        assert_eq!(quote.total, 84_999);
    }

    #[test]
    fn amount_discount_is_capped_at_sub_total() {
        let quote = evaluate_promotion(&promotion("amount", 50_000, 0), 30_000, now()).unwrap();

        assert_eq!(quote.discount, 30_000);
        assert_eq!(quote.total, 0);
    }

    #[test]
    fn window_edges_are_inclusive() {
        let promo = promotion("amount", 1_000, 0);

        assert!(evaluate_promotion(&promo, 10_000, promo.start_date).is_ok());
        assert!(evaluate_promotion(&promo, 10_000, promo.end_date).is_ok());
    }

    #[test]
    fn expired_code_is_rejected() {
        let promo = promotion("percent", 10, 0);
        let later = promo.end_date + Duration::seconds(1);

        assert!(matches!(
            evaluate_promotion(&promo, 100_000, later),
            Err(ServiceError::InvalidOrder(_))
        ));
    }

    #[test]
    fn code_not_yet_started_is_rejected() {
        let promo = promotion("percent", 10, 0);
        let earlier = promo.start_date - Duration::seconds(1);

        assert!(evaluate_promotion(&promo, 100_000, earlier).is_err());
    }

    #[test]
    fn minimum_order_value_is_enforced() {
        let promo = promotion("amount", 10_000, 200_000);

        assert!(evaluate_promotion(&promo, 199_999, now()).is_err());
        assert!(evaluate_promotion(&promo, 200_000, now()).is_ok());
    }

    #[test]
    fn inactive_or_trashed_code_is_rejected() {
        let mut promo = promotion("amount", 10_000, 0);
        promo.status = "inactive".into();
        assert!(evaluate_promotion(&promo, 50_000, now()).is_err());

        let mut promo = promotion("amount", 10_000, 0);
        promo.deleted_at = Some(now());
        assert!(evaluate_promotion(&promo, 50_000, now()).is_err());
    }
}
