mod admin;
mod auth;
mod cart;
mod catalog;
mod order;
mod payment;
mod promotion;

use anyhow::Result;
use axum::{
    Json,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use serde_json::json;
use shared::{state::AppState, utils::shutdown_signal};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::admin::admin_routes;
pub use self::auth::auth_routes;
pub use self::cart::cart_routes;
pub use self::catalog::catalog_routes;
pub use self::order::order_routes;
pub use self::payment::payment_routes;
pub use self::promotion::promotion_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_handler,
        auth::login_handler,
        auth::logout_handler,
        auth::forgot_password_handler,
        auth::reset_password_handler,
        auth::me_handler,

        catalog::list_products,
        catalog::featured_products,
        catalog::product_detail,
        catalog::list_categories,

        cart::get_cart,
        cart::add_to_cart,
        cart::remove_cart_item,
        cart::clear_cart,

        order::create_order,
        order::track_order,
        order::my_orders,
        order::cancel_order,

        promotion::check_promotion,

        payment::create_payment_url,
        payment::vnpay_return,
        payment::vnpay_ipn,

        admin::admin_login,
        admin::admin_logout,
        admin::admin_me,

        admin::admin_list_products,
        admin::admin_trashed_products,
        admin::admin_get_product,
        admin::admin_create_product,
        admin::admin_update_product,
        admin::admin_product_status,
        admin::admin_trash_product,
        admin::admin_restore_product,

        admin::admin_list_categories,
        admin::admin_trashed_categories,
        admin::admin_get_category,
        admin::admin_create_category,
        admin::admin_update_category,
        admin::admin_category_status,
        admin::admin_trash_category,
        admin::admin_restore_category,

        admin::admin_list_promotions,
        admin::admin_trashed_promotions,
        admin::admin_get_promotion,
        admin::admin_create_promotion,
        admin::admin_update_promotion,
        admin::admin_trash_promotion,
        admin::admin_restore_promotion,

        admin::admin_list_orders,
        admin::admin_get_order,
        admin::admin_order_status,
        admin::admin_order_payment_status,
        admin::admin_trash_order,

        admin::admin_list_customers,
        admin::admin_get_customer,
        admin::admin_customer_status,
        admin::admin_trash_customer,

        admin::admin_list_accounts,
        admin::admin_get_account,
        admin::admin_create_account,
        admin::admin_update_account,
        admin::admin_trash_account,

        admin::admin_list_roles,
        admin::admin_get_role,
        admin::admin_create_role,
        admin::admin_update_role,
        admin::admin_trash_role,
        admin::admin_role_permissions,
        admin::admin_permission_catalog,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Customer sign-up and sign-in"),
        (name = "Catalog", description = "Products and categories on sale"),
        (name = "Cart", description = "Customer cart"),
        (name = "Order", description = "Checkout and order tracking"),
        (name = "Promotion", description = "Discount codes"),
        (name = "Payment", description = "VNPay redirect and callbacks"),
        (name = "Admin Auth", description = "Back-office sign-in"),
        (name = "Admin Product", description = "Product management"),
        (name = "Admin Category", description = "Category management"),
        (name = "Admin Promotion", description = "Promotion management"),
        (name = "Admin Order", description = "Order management"),
        (name = "Admin Customer", description = "Customer management"),
        (name = "Admin Account", description = "Back-office accounts"),
        (name = "Admin Role", description = "Roles and permissions"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub async fn health_checker_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "Storefront API is running"
        })),
    )
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> axum::Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/health", get(health_checker_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(auth_routes(shared_state.clone()))
            .merge(catalog_routes(shared_state.clone()))
            .merge(cart_routes(shared_state.clone()))
            .merge(order_routes(shared_state.clone()))
            .merge(promotion_routes(shared_state.clone()))
            .merge(payment_routes(shared_state.clone()))
            .merge(admin_routes(shared_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(10 * 1024 * 1024))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        Ok(())
    }
}
