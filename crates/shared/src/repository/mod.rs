mod admin;
mod cart;
mod category;
mod customer;
mod order;
mod product;
mod promotion;
mod role;

pub use self::admin::AdminRepository;
pub use self::cart::CartRepository;
pub use self::category::CategoryRepository;
pub use self::customer::CustomerRepository;
pub use self::order::{OrderCommandRepository, OrderQueryRepository};
pub use self::product::{ProductCommandRepository, ProductQueryRepository};
pub use self::promotion::PromotionRepository;
pub use self::role::RoleRepository;

use sqlx::{FromRow, Row, postgres::PgRow};

/// Splits rows selected with `COUNT(*) OVER() AS total_count` into the
/// page of models and the unpaged total.
pub(crate) fn into_page<T>(rows: Vec<PgRow>) -> Result<(Vec<T>, i64), sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    let total = match rows.first() {
        Some(row) => row.try_get::<i64, _>("total_count")?,
        None => 0,
    };

    let items = rows.iter().map(T::from_row).collect::<Result<Vec<_>, _>>()?;

    Ok((items, total))
}
