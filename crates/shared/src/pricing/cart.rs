use crate::model::CartLine;

/// Merges `incoming` into `existing` by product id.
///
/// A product already in the cart has its quantity, price, discount and total
/// replaced by the incoming values (never summed). New products are appended
/// in the order they arrive.
pub fn merge_cart_lines(existing: Vec<CartLine>, incoming: Vec<CartLine>) -> Vec<CartLine> {
    let mut merged = existing;

    for line in incoming {
        match merged
            .iter_mut()
            .find(|current| current.product_id == line.product_id)
        {
            Some(current) => *current = line,
            None => merged.push(line),
        }
    }

    merged
}

pub fn remove_cart_line(lines: Vec<CartLine>, product_id: i32) -> Vec<CartLine> {
    lines
        .into_iter()
        .filter(|line| line.product_id != product_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: i32, quantity: i32) -> CartLine {
        CartLine {
            product_id,
            quantity,
            price: 10_000,
            discount: 0.0,
            total: 10_000 * quantity as i64,
        }
    }

    #[test]
    fn same_product_twice_keeps_one_line_with_latest_quantity() {
        let merged = merge_cart_lines(vec![line(1, 2)], vec![line(1, 5)]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].quantity, 5);
        assert_eq!(merged[0].total, 50_000);
    }

    #[test]
    fn new_products_are_appended_in_order() {
        let merged = merge_cart_lines(vec![line(1, 1)], vec![line(3, 1), line(2, 1)]);

        let ids: Vec<i32> = merged.iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn later_duplicate_in_one_batch_wins() {
        let merged = merge_cart_lines(Vec::new(), vec![line(4, 1), line(4, 7)]);

        assert_eq!(merged, vec![line(4, 7)]);
    }

    #[test]
    fn overwrite_replaces_price_fields_too() {
        let mut repriced = line(1, 2);
        repriced.price = 8_000;
        repriced.discount = 20.0;
        repriced.total = 16_000;

        let merged = merge_cart_lines(vec![line(1, 2)], vec![repriced.clone()]);
        assert_eq!(merged, vec![repriced]);
    }

    #[test]
    fn remove_drops_only_matching_product() {
        let remaining = remove_cart_line(vec![line(1, 1), line(2, 1)], 1);
        assert_eq!(remaining, vec![line(2, 1)]);
    }
}
