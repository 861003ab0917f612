mod account;
mod auth;
mod category;
mod customer;
mod order;
mod product;
mod promotion;
mod role;

use crate::middleware::jwt::{CurrentAdmin, admin_auth};
use axum::{Extension, middleware};
use shared::{abstract_trait::DynPermissionService, errors::HttpError, state::AppState};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

pub(crate) use self::{
    account::*, auth::*, category::*, customer::*, order::*, product::*, promotion::*, role::*,
};

/// Rejects with 403 unless the signed-in admin's role grants `permission`.
pub(crate) async fn require(
    permissions: &DynPermissionService,
    CurrentAdmin(admin_id): CurrentAdmin,
    permission: &str,
) -> Result<(), HttpError> {
    permissions.authorize(admin_id, permission).await?;
    Ok(())
}

pub fn admin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let di = &app_state.di_container;

    let protected = OpenApiRouter::new()
        .merge(admin_session_routes(app_state.clone()))
        .merge(admin_product_routes(app_state.clone()))
        .merge(admin_category_routes(app_state.clone()))
        .merge(admin_promotion_routes(app_state.clone()))
        .merge(admin_order_routes(app_state.clone()))
        .merge(admin_customer_routes(app_state.clone()))
        .merge(admin_account_routes(app_state.clone()))
        .merge(admin_role_routes(app_state.clone()))
        .route_layer(middleware::from_fn(admin_auth));

    admin_login_routes(app_state.clone())
        .merge(protected)
        .layer(Extension(di.permission_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
