use crate::{
    abstract_trait::{
        DynAdminRepository, DynAdminService, DynAuthService, DynCartRepository, DynCartService,
        DynCategoryRepository, DynCategoryService, DynCustomerRepository, DynCustomerService,
        DynEmailService, DynHashing, DynJwtService, DynOrderCommandRepository,
        DynOrderCommandService, DynOrderQueryRepository, DynOrderQueryService, DynOtpStore,
        DynPaymentService, DynPermissionService, DynProductCommandRepository,
        DynProductCommandService, DynProductQueryRepository, DynProductQueryService,
        DynPromotionRepository, DynPromotionService, DynRoleRepository, DynRoleService,
    },
    cache::{CacheStore, OtpStore},
    config::{ConnectionPool, RedisClient, VnpayConfig},
    repository::{
        AdminRepository, CartRepository, CategoryRepository, CustomerRepository,
        OrderCommandRepository, OrderQueryRepository, ProductCommandRepository,
        ProductQueryRepository, PromotionRepository, RoleRepository,
    },
    service::{
        AdminService, AdminServiceDeps, AuthService, AuthServiceDeps, CartService,
        CategoryService, CustomerService, OrderCommandService, OrderCommandServiceDeps,
        OrderQueryService, PaymentService, PermissionService, ProductCommandService,
        ProductQueryService, PromotionService, RoleService,
    },
    vnpay::VnpayGateway,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub customer_service: DynCustomerService,
    pub admin_service: DynAdminService,
    pub role_service: DynRoleService,
    pub permission_service: DynPermissionService,
    pub category_service: DynCategoryService,
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub promotion_service: DynPromotionService,
    pub cart_service: DynCartService,
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
    pub payment_service: DynPaymentService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("customer_service", &"<CustomerService>")
            .field("admin_service", &"<AdminService>")
            .field("role_service", &"<RoleService>")
            .field("permission_service", &"<PermissionService>")
            .field("category_service", &"<CategoryService>")
            .field("product_query", &"<ProductQueryService>")
            .field("product_command", &"<ProductCommandService>")
            .field("promotion_service", &"<PromotionService>")
            .field("cart_service", &"<CartService>")
            .field("order_query", &"<OrderQueryService>")
            .field("order_command", &"<OrderCommandService>")
            .field("payment_service", &"<PaymentService>")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub redis: RedisClient,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
    pub email: DynEmailService,
    pub vnpay: VnpayConfig,
    pub client_url: String,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            pool,
            redis,
            hash,
            jwt_config,
            email,
            vnpay,
            client_url,
            registry,
        } = deps;

        let customers = Arc::new(CustomerRepository::new(pool.clone())) as DynCustomerRepository;
        let admins = Arc::new(AdminRepository::new(pool.clone())) as DynAdminRepository;
        let roles = Arc::new(RoleRepository::new(pool.clone())) as DynRoleRepository;
        let categories = Arc::new(CategoryRepository::new(pool.clone())) as DynCategoryRepository;
        let product_query_repo =
            Arc::new(ProductQueryRepository::new(pool.clone())) as DynProductQueryRepository;
        let product_command_repo =
            Arc::new(ProductCommandRepository::new(pool.clone())) as DynProductCommandRepository;
        let promotions = Arc::new(PromotionRepository::new(pool.clone())) as DynPromotionRepository;
        let carts = Arc::new(CartRepository::new(pool.clone())) as DynCartRepository;
        let order_query_repo =
            Arc::new(OrderQueryRepository::new(pool.clone())) as DynOrderQueryRepository;
        let order_command_repo =
            Arc::new(OrderCommandRepository::new(pool)) as DynOrderCommandRepository;

        let otp = Arc::new(OtpStore::new(CacheStore::new(redis.pool.clone()))) as DynOtpStore;
        let gateway = Arc::new(VnpayGateway::new(vnpay));

        let auth_service = Arc::new(
            AuthService::new(
                AuthServiceDeps {
                    customers: customers.clone(),
                    hashing: hash.clone(),
                    jwt: jwt_config.clone(),
                    otp,
                    email: email.clone(),
                },
                registry.clone(),
            )
            .await,
        ) as DynAuthService;

        let customer_service =
            Arc::new(CustomerService::new(customers, registry.clone()).await) as DynCustomerService;

        let admin_service = Arc::new(
            AdminService::new(
                AdminServiceDeps {
                    admins,
                    roles: roles.clone(),
                    hashing: hash,
                    jwt: jwt_config,
                },
                registry.clone(),
            )
            .await,
        ) as DynAdminService;

        let role_service =
            Arc::new(RoleService::new(roles.clone(), registry.clone()).await) as DynRoleService;

        let permission_service =
            Arc::new(PermissionService::new(roles, registry.clone()).await) as DynPermissionService;

        let category_service = Arc::new(CategoryService::new(categories, registry.clone()).await)
            as DynCategoryService;

        let product_query = Arc::new(
            ProductQueryService::new(product_query_repo.clone(), registry.clone()).await,
        ) as DynProductQueryService;

        let product_command = Arc::new(
            ProductCommandService::new(
                product_query_repo.clone(),
                product_command_repo,
                registry.clone(),
            )
            .await,
        ) as DynProductCommandService;

        let promotion_service =
            Arc::new(PromotionService::new(promotions.clone(), registry.clone()).await)
                as DynPromotionService;

        let cart_service =
            Arc::new(CartService::new(carts.clone(), registry.clone()).await) as DynCartService;

        let order_query = Arc::new(
            OrderQueryService::new(order_query_repo.clone(), registry.clone()).await,
        ) as DynOrderQueryService;

        let order_command = Arc::new(
            OrderCommandService::new(
                OrderCommandServiceDeps {
                    product_query: product_query_repo,
                    promotion: promotions,
                    order_query: order_query_repo.clone(),
                    order_command: order_command_repo.clone(),
                    cart: carts,
                    email,
                    gateway: gateway.clone(),
                    client_url,
                },
                registry.clone(),
            )
            .await,
        ) as DynOrderCommandService;

        let payment_service = Arc::new(
            PaymentService::new(order_query_repo, order_command_repo, gateway, registry).await,
        ) as DynPaymentService;

        Self {
            auth_service,
            customer_service,
            admin_service,
            role_service,
            permission_service,
            category_service,
            product_query,
            product_command,
            promotion_service,
            cart_service,
            order_query,
            order_command,
            payment_service,
        }
    }
}
