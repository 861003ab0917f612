mod admin;
mod cart;
mod category;
mod customer;
mod email;
mod hashing;
mod jwt;
mod order;
mod otp;
mod payment;
mod product;
mod promotion;
mod rate_limit;
mod role;

pub use self::admin::{AdminRepositoryTrait, AdminServiceTrait, DynAdminRepository, DynAdminService};
pub use self::cart::{CartRepositoryTrait, CartServiceTrait, DynCartRepository, DynCartService};
pub use self::category::{
    CategoryRepositoryTrait, CategoryServiceTrait, DynCategoryRepository, DynCategoryService,
};
pub use self::customer::{
    AuthServiceTrait, CustomerRepositoryTrait, CustomerServiceTrait, DynAuthService,
    DynCustomerRepository, DynCustomerService,
};
pub use self::email::{DynEmailService, EmailRequest, EmailServiceTrait};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::order::{
    DynOrderCommandRepository, DynOrderCommandService, DynOrderQueryRepository,
    DynOrderQueryService, OrderCommandRepositoryTrait, OrderCommandServiceTrait,
    OrderQueryRepositoryTrait, OrderQueryServiceTrait,
};
pub use self::otp::{DynOtpStore, OtpStoreTrait};
pub use self::payment::{DynPaymentService, PaymentServiceTrait};
pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, ProductCommandRepositoryTrait, ProductCommandServiceTrait,
    ProductQueryRepositoryTrait, ProductQueryServiceTrait,
};
pub use self::promotion::{
    DynPromotionRepository, DynPromotionService, PromotionRepositoryTrait, PromotionServiceTrait,
};
pub use self::rate_limit::{DynRateLimiter, RateLimiterTrait};
pub use self::role::{
    DynPermissionService, DynRoleRepository, DynRoleService, PermissionServiceTrait,
    RoleRepositoryTrait, RoleServiceTrait,
};
