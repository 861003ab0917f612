use super::require;
use crate::middleware::{
    jwt::CurrentAdmin,
    validate::{SimpleValidatedJson, ValidatedQuery},
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use shared::{
    abstract_trait::{DynCustomerService, DynPermissionService},
    domain::{
        requests::{FindAllRecords, UpdateCustomerStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, CustomerResponse},
    },
    errors::HttpError,
    service::{CUSTOMERS_EDIT, CUSTOMERS_VIEW},
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/admin/customers",
    params(FindAllRecords),
    responses((status = 200, description = "Customers", body = ApiResponsePagination<Vec<CustomerResponse>>)),
    security(("bearer_auth" = [])),
    tag = "Admin Customer"
)]
pub async fn admin_list_customers(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCustomerService>,
    ValidatedQuery(params): ValidatedQuery<FindAllRecords>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CUSTOMERS_VIEW).await?;
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/admin/customers/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer detail", body = ApiResponse<CustomerResponse>),
        (status = 404, description = "Customer not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Customer"
)]
pub async fn admin_get_customer(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCustomerService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CUSTOMERS_VIEW).await?;
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/admin/customers/{id}/status",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerStatusRequest,
    responses((status = 200, description = "Customer locked or unlocked", body = ApiResponse<CustomerResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Customer"
)]
pub async fn admin_customer_status(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCustomerService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCustomerStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CUSTOMERS_EDIT).await?;
    let response = service.update_status(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/admin/customers/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    responses((status = 200, description = "Customer moved to trash", body = ApiResponse<CustomerResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Customer"
)]
pub async fn admin_trash_customer(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCustomerService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CUSTOMERS_EDIT).await?;
    let response = service.trash_customer(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_customer_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/admin/customers", get(admin_list_customers))
        .route(
            "/admin/customers/{id}",
            get(admin_get_customer).delete(admin_trash_customer),
        )
        .route("/admin/customers/{id}/status", patch(admin_customer_status))
        .layer(Extension(app_state.di_container.customer_service.clone()))
}
