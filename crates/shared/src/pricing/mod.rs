//! Price arithmetic shared by the cart, promotion and order services.
//!
//! Everything here is pure: callers fetch the live rows and hand them in,
//! so the checks can be exercised without a database.

mod cart;
mod promotion;
mod reconcile;

pub use self::cart::{merge_cart_lines, remove_cart_line};
pub use self::promotion::{PromotionQuote, evaluate_promotion};
pub use self::reconcile::{check_order_totals, reconcile_line, sum_line_totals};

use crate::errors::ServiceError;

/// Allowed drift, in percentage points, on a submitted line discount.
pub const DISCOUNT_TOLERANCE: f64 = 0.01;

/// Allowed drift, in currency units, on the order discount and total.
pub const TOTAL_TOLERANCE: i64 = 1;

/// Percentage off the compare-at price, `0.0` when there is no markdown.
pub fn product_discount(price: i64, compare_price: i64) -> f64 {
    if compare_price > price {
        (compare_price - price) as f64 / compare_price as f64 * 100.0
    } else {
        0.0
    }
}

/// `price × quantity`, refused when the product does not fit an `i64`.
pub fn line_total(price: i64, quantity: i32) -> Result<i64, ServiceError> {
    price
        .checked_mul(quantity as i64)
        .ok_or_else(|| ServiceError::InvalidOrder("Line total is too large".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_is_zero_without_markdown() {
        assert_eq!(product_discount(100_000, 0), 0.0);
        assert_eq!(product_discount(100_000, 100_000), 0.0);
        assert_eq!(product_discount(120_000, 100_000), 0.0);
    }

    #[test]
    fn discount_is_percentage_of_compare_price() {
        assert_eq!(product_discount(75_000, 100_000), 25.0);

        let third = product_discount(200_000, 300_000);
        assert!((third - 33.333_333).abs() < 0.000_1);
    }

    #[test]
    fn line_total_multiplies_quantity() {
        assert_eq!(line_total(45_000, 3).unwrap(), 135_000);
    }

    #[test]
    fn line_total_refuses_overflow() {
        assert!(matches!(
            line_total(5_000_000_000, 2_000_000_000),
            Err(ServiceError::InvalidOrder(_))
        ));
    }
}
