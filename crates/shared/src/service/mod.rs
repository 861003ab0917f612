mod admin;
mod auth;
mod cart;
mod category;
mod customer;
mod order;
mod payment;
mod permission;
mod product;
mod promotion;
mod role;
mod slug;

pub use self::admin::{AdminService, AdminServiceDeps};
pub use self::auth::{AuthService, AuthServiceDeps, MAX_OTP_ATTEMPTS, OTP_TTL_MINUTES};
pub use self::cart::CartService;
pub use self::category::CategoryService;
pub use self::customer::CustomerService;
pub use self::order::{OrderCommandService, OrderCommandServiceDeps, OrderQueryService};
pub use self::payment::PaymentService;
pub use self::permission::{
    ACCOUNTS_EDIT, ACCOUNTS_VIEW, CATEGORIES_EDIT, CATEGORIES_VIEW, CUSTOMERS_EDIT,
    CUSTOMERS_VIEW, ORDERS_EDIT, ORDERS_VIEW, PERMISSIONS, PRODUCTS_EDIT, PRODUCTS_VIEW,
    PROMOTIONS_EDIT, PROMOTIONS_VIEW, PermissionService, ROLES_EDIT, ROLES_PERMISSIONS,
    ROLES_VIEW,
};
pub use self::product::{ProductCommandService, ProductQueryService};
pub use self::promotion::{PromotionService, normalize_code};
pub use self::role::RoleService;
