mod account;
mod api;
mod cart;
mod catalog;
mod order;
mod pagination;
mod payment;
mod promotion;

pub use self::account::{
    AdminProfileResponse, AdminResponse, CustomerResponse, RoleResponse, TokenResponse,
};
pub use self::api::{ApiResponse, ApiResponsePagination};
pub use self::cart::CartResponse;
pub use self::catalog::{CategoryResponse, ProductResponse};
pub use self::order::{CreateOrderResponse, OrderResponse};
pub use self::pagination::Pagination;
pub use self::payment::{PaymentResultResponse, PaymentUrlResponse};
pub use self::promotion::PromotionResponse;
