use crate::{
    domain::requests::OrderItemRequest,
    errors::ServiceError,
    model::{OrderLine, Product},
    pricing::{DISCOUNT_TOLERANCE, TOTAL_TOLERANCE, line_total, product_discount},
};

/// Checks one submitted line against the live product and returns the
/// snapshot to store on the order.
///
/// Price and total must match exactly; the discount percentage may drift by
/// [`DISCOUNT_TOLERANCE`].
pub fn reconcile_line(
    submitted: &OrderItemRequest,
    product: &Product,
) -> Result<OrderLine, ServiceError> {
    if !product.is_purchasable() {
        return Err(ServiceError::InvalidOrder(format!(
            "Product {} is no longer available",
            product.name
        )));
    }

    if submitted.quantity < 1 {
        return Err(ServiceError::InvalidOrder(format!(
            "Quantity for {} must be at least 1",
            product.name
        )));
    }

    if submitted.price != product.price {
        return Err(ServiceError::InvalidOrder(format!(
            "Price of {} has changed",
            product.name
        )));
    }

    let discount = product_discount(product.price, product.compare_price);
    if (submitted.discount - discount).abs() > DISCOUNT_TOLERANCE {
        return Err(ServiceError::InvalidOrder(format!(
            "Discount of {} has changed",
            product.name
        )));
    }

    let total = line_total(product.price, submitted.quantity)?;
    if submitted.total != total {
        return Err(ServiceError::InvalidOrder(format!(
            "Line total of {} does not match",
            product.name
        )));
    }

    Ok(OrderLine {
        product_id: product.product_id,
        name: product.name.clone(),
        thumbnail: product.thumbnail.clone(),
        price: product.price,
        discount,
        quantity: submitted.quantity,
        total,
    })
}

pub fn sum_line_totals(lines: &[OrderLine]) -> Result<i64, ServiceError> {
    lines.iter().try_fold(0i64, |sum, line| {
        sum.checked_add(line.total)
            .ok_or_else(|| ServiceError::InvalidOrder("Order sub-total is too large".to_string()))
    })
}

/// Compares the client's discount and grand total with the server's figures.
pub fn check_order_totals(
    submitted_discount: i64,
    submitted_total: i64,
    sub_total: i64,
    discount: i64,
) -> Result<(), ServiceError> {
    if submitted_discount.abs_diff(discount) > TOTAL_TOLERANCE as u64 {
        return Err(ServiceError::InvalidOrder(
            "Order discount does not match".to_string(),
        ));
    }

    if submitted_total.abs_diff(sub_total - discount) > TOTAL_TOLERANCE as u64 {
        return Err(ServiceError::InvalidOrder(
            "Order total does not match".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            product_id: 1,
            category_id: Some(1),
            name: "Ao thun".into(),
            slug: "ao-thun".into(),
            description: None,
            price: 200_000,
            compare_price: 300_000,
            thumbnail: Some("https://cdn.example/ao.jpg".into()),
            images: Vec::new(),
            status: "active".into(),
            position: 0,
            featured: false,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    fn submitted(price: i64, discount: f64, quantity: i32, total: i64) -> OrderItemRequest {
        OrderItemRequest {
            product_id: 1,
            quantity,
            price,
            discount,
            total,
        }
    }

    #[test]
    fn matching_line_becomes_snapshot() {
        let line = reconcile_line(&submitted(200_000, 33.33, 2, 400_000), &product()).unwrap();

        assert_eq!(line.total, 400_000);
        assert_eq!(line.name, "Ao thun");
        assert!((line.discount - 33.333_333).abs() < 0.001);
    }

    #[test]
    fn stale_price_is_rejected() {
        let result = reconcile_line(&submitted(190_000, 33.33, 1, 190_000), &product());
        assert!(matches!(result, Err(ServiceError::InvalidOrder(_))));
    }

    #[test]
    fn discount_outside_tolerance_is_rejected() {
        let result = reconcile_line(&submitted(200_000, 33.0, 1, 200_000), &product());
        assert!(result.is_err());
    }

    #[test]
    fn wrong_line_total_is_rejected() {
        let result = reconcile_line(&submitted(200_000, 33.33, 2, 399_999), &product());
        assert!(result.is_err());
    }

    #[test]
    fn unavailable_product_is_rejected() {
        let mut hidden = product();
        hidden.status = "inactive".into();
        assert!(reconcile_line(&submitted(200_000, 33.33, 1, 200_000), &hidden).is_err());

        let mut trashed = product();
        trashed.deleted_at = Some(chrono::Utc::now().naive_utc());
        assert!(reconcile_line(&submitted(200_000, 33.33, 1, 200_000), &trashed).is_err());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(reconcile_line(&submitted(200_000, 33.33, 0, 0), &product()).is_err());
    }

    #[test]
    fn totals_accept_one_unit_of_drift() {
        assert!(check_order_totals(15_001, 84_999, 100_000, 15_000).is_ok());
        assert!(check_order_totals(15_002, 84_998, 100_000, 15_000).is_err());
        assert!(check_order_totals(15_000, 85_002, 100_000, 15_000).is_err());
        assert!(check_order_totals(i64::MIN, i64::MIN, 100_000, 15_000).is_err());
    }

    #[test]
    fn oversized_quantity_is_rejected_not_wrapped() {
        let mut pricey = product();
        pricey.price = 5_000_000_000;
        pricey.compare_price = 0;

        let result = reconcile_line(
            &submitted(5_000_000_000, 0.0, 2_000_000_000, 0),
            &pricey,
        );
        assert!(matches!(result, Err(ServiceError::InvalidOrder(_))));
    }

    #[test]
    fn sub_total_overflow_is_rejected() {
        let line = |total: i64| OrderLine {
            product_id: 1,
            name: "Ao thun".into(),
            thumbnail: None,
            price: total,
            discount: 0.0,
            quantity: 1,
            total,
        };

        assert_eq!(sum_line_totals(&[line(1), line(2)]).unwrap(), 3);
        assert!(sum_line_totals(&[line(i64::MAX), line(1)]).is_err());
    }
}
