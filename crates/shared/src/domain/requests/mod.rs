mod admin;
mod auth;
mod cart;
mod category;
mod order;
mod payment;
mod product;
mod promotion;
mod query;

pub use self::admin::{
    CreateAdminRequest, RoleRequest, UpdateAdminRequest, UpdateCustomerStatusRequest,
    UpdatePermissionsRequest,
};
pub use self::auth::{ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest};
pub use self::cart::{AddToCartRequest, CartItemRequest};
pub use self::category::CategoryRequest;
pub use self::order::{
    CreateOrderRequest, OrderItemRequest, UpdateOrderStatusRequest, UpdatePaymentStatusRequest,
};
pub use self::payment::CreatePaymentRequest;
pub use self::product::{ProductRequest, UpdateStatusRequest};
pub use self::promotion::{CheckPromotionRequest, PromotionRequest};
pub use self::query::{
    FindAllProducts, FindAllRecords, MAX_PAGE_SIZE, PageQuery, limit_offset, search_term, status_filter,
};
