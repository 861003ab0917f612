mod admin;
mod cart;
mod category;
mod customer;
mod order;
mod product;
mod promotion;
mod role;

pub use self::admin::AdminAccount;
pub use self::cart::{Cart, CartLine};
pub use self::category::Category;
pub use self::customer::Customer;
pub use self::order::{NewOrder, Order, OrderLine, PaymentUpdate, PromotionSnapshot};
pub use self::product::Product;
pub use self::promotion::Promotion;
pub use self::role::Role;
