use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    abstract_trait::{DynPromotionRepository, PromotionServiceTrait},
    domain::{
        requests::{CheckPromotionRequest, FindAllRecords, PromotionRequest},
        responses::{ApiResponse, ApiResponsePagination, Pagination, PromotionResponse},
        status::DiscountType,
    },
    errors::{RepositoryError, ServiceError},
    model::Promotion as PromotionModel,
    pricing::{PromotionQuote, evaluate_promotion},
    utils::{Method, ServiceObserver, TracingContext},
};

/// Codes are matched trimmed and upper-case.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn validate_terms(req: &PromotionRequest) -> Result<PromotionRequest, ServiceError> {
    let mut errors = Vec::new();

    let code = normalize_code(&req.code);
    if code.is_empty() {
        errors.push("Code is required".to_string());
    }

    if req.discount_type == DiscountType::Percent && !(1..=100).contains(&req.discount_value) {
        errors.push("Percent discount must be between 1 and 100".to_string());
    }

    if req.end_date <= req.start_date {
        errors.push("End date must be after start date".to_string());
    }

    if !errors.is_empty() {
        return Err(ServiceError::Validation(errors));
    }

    Ok(PromotionRequest {
        code,
        ..req.clone()
    })
}

pub struct PromotionService {
    repository: DynPromotionRepository,
    observer: ServiceObserver,
}

impl PromotionService {
    pub async fn new(repository: DynPromotionRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let observer = ServiceObserver::new("promotion_service", &registry).await;

        Self {
            repository,
            observer,
        }
    }

    fn finish(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<PromotionModel, RepositoryError>,
        message: &str,
    ) -> Result<ApiResponse<PromotionResponse>, ServiceError> {
        match result {
            Ok(promotion) => {
                self.observer.success(tracing_ctx, method, message);
                Ok(ApiResponse::success(message, PromotionResponse::from(promotion)))
            }
            Err(err) => {
                error!("❌ Promotion command failed: {err:?}");
                self.observer.failure(tracing_ctx, method, &err.to_string());
                Err(ServiceError::Repo(err))
            }
        }
    }

    /// Rejects a code already used by another live promotion.
    async fn ensure_code_free(&self, code: &str, own_id: Option<i32>) -> Result<(), ServiceError> {
        match self.repository.find_by_code(code).await? {
            Some(other) if Some(other.promotion_id) != own_id => {
                warn!("⚠️ Promotion code {code} is already in use");
                Err(ServiceError::Repo(RepositoryError::AlreadyExists(format!(
                    "Promotion code {code} already exists"
                ))))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PromotionServiceTrait for PromotionService {
    async fn find_all(
        &self,
        req: &FindAllRecords,
        trashed: bool,
    ) -> Result<ApiResponsePagination<Vec<PromotionResponse>>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "find_all_promotions",
            vec![
                KeyValue::new("component", "promotion"),
                KeyValue::new("trashed", trashed),
            ],
        );

        let (promotions, total) = match self.repository.find_all(req, trashed).await {
            Ok(page) => page,
            Err(err) => {
                error!("❌ Failed to fetch promotions: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to fetch promotions");
                return Err(ServiceError::Repo(err));
            }
        };

        self.observer
            .success(&tracing_ctx, Method::Get, "Promotions retrieved");

        Ok(ApiResponsePagination::success(
            "Promotions retrieved successfully",
            promotions.into_iter().map(PromotionResponse::from).collect(),
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<PromotionResponse>, ServiceError> {
        match self.repository.find_by_id(id).await? {
            Some(promotion) => Ok(ApiResponse::success(
                "Promotion retrieved successfully",
                PromotionResponse::from(promotion),
            )),
            None => Err(ServiceError::NotFound(format!("Promotion {id} not found"))),
        }
    }

    async fn create_promotion(
        &self,
        req: &PromotionRequest,
    ) -> Result<ApiResponse<PromotionResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "create_promotion",
            vec![
                KeyValue::new("component", "promotion"),
                KeyValue::new("promotion.code", req.code.clone()),
            ],
        );

        let checked = match validate_terms(req) {
            Ok(checked) => checked,
            Err(err) => {
                self.observer
                    .failure(&tracing_ctx, Method::Post, "Invalid promotion terms");
                return Err(err);
            }
        };

        if let Err(err) = self.ensure_code_free(&checked.code, None).await {
            self.observer
                .failure(&tracing_ctx, Method::Post, "Promotion code taken");
            return Err(err);
        }

        info!("🎟️ Creating promotion {}", checked.code);

        let result = self.repository.create_promotion(&checked).await;
        self.finish(&tracing_ctx, Method::Post, result, "Promotion created successfully")
    }

    async fn update_promotion(
        &self,
        id: i32,
        req: &PromotionRequest,
    ) -> Result<ApiResponse<PromotionResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "update_promotion",
            vec![
                KeyValue::new("component", "promotion"),
                KeyValue::new("promotion.id", id.to_string()),
            ],
        );

        let checked = match validate_terms(req) {
            Ok(checked) => checked,
            Err(err) => {
                self.observer
                    .failure(&tracing_ctx, Method::Put, "Invalid promotion terms");
                return Err(err);
            }
        };

        if let Err(err) = self.ensure_code_free(&checked.code, Some(id)).await {
            self.observer
                .failure(&tracing_ctx, Method::Put, "Promotion code taken");
            return Err(err);
        }

        let result = self.repository.update_promotion(id, &checked).await;
        self.finish(&tracing_ctx, Method::Put, result, "Promotion updated successfully")
    }

    async fn trash_promotion(
        &self,
        id: i32,
    ) -> Result<ApiResponse<PromotionResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "trash_promotion",
            vec![
                KeyValue::new("component", "promotion"),
                KeyValue::new("promotion.id", id.to_string()),
            ],
        );

        let result = self.repository.trash_promotion(id).await;
        self.finish(&tracing_ctx, Method::Delete, result, "Promotion moved to trash")
    }

    async fn restore_promotion(
        &self,
        id: i32,
    ) -> Result<ApiResponse<PromotionResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "restore_promotion",
            vec![
                KeyValue::new("component", "promotion"),
                KeyValue::new("promotion.id", id.to_string()),
            ],
        );

        let result = self.repository.restore_promotion(id).await;
        self.finish(&tracing_ctx, Method::Patch, result, "Promotion restored successfully")
    }

    async fn check_code(
        &self,
        req: &CheckPromotionRequest,
    ) -> Result<ApiResponse<PromotionQuote>, ServiceError> {
        let code = normalize_code(&req.code);

        let tracing_ctx = self.observer.start(
            "check_promotion_code",
            vec![
                KeyValue::new("component", "promotion"),
                KeyValue::new("promotion.code", code.clone()),
                KeyValue::new("sub_total", req.sub_total),
            ],
        );

        let promotion = match self.repository.find_by_code(&code).await {
            Ok(Some(promotion)) => promotion,
            Ok(None) => {
                self.observer
                    .failure(&tracing_ctx, Method::Post, "Promotion code not found");
                return Err(ServiceError::NotFound(format!(
                    "Promotion code {code} not found"
                )));
            }
            Err(err) => {
                self.observer
                    .failure(&tracing_ctx, Method::Post, "Failed to load promotion");
                return Err(ServiceError::Repo(err));
            }
        };

        match evaluate_promotion(&promotion, req.sub_total, Utc::now().naive_utc()) {
            Ok(quote) => {
                self.observer
                    .success(&tracing_ctx, Method::Post, "Promotion code applies");
                Ok(ApiResponse::success("Promotion code applied", quote))
            }
            Err(err) => {
                warn!("⚠️ Promotion {code} rejected: {err}");
                self.observer
                    .failure(&tracing_ctx, Method::Post, &err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn request(discount_type: DiscountType, value: i64) -> PromotionRequest {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        PromotionRequest {
            code: "  summer10 ".into(),
            description: None,
            discount_type,
            discount_value: value,
            min_order_value: 0,
            start_date: start,
            end_date: start + Duration::days(30),
            status: crate::domain::status::RecordStatus::Active,
        }
    }

    #[test]
    fn code_is_trimmed_and_upper_cased() {
        let checked = validate_terms(&request(DiscountType::Percent, 10)).unwrap();
        assert_eq!(checked.code, "SUMMER10");
    }

    #[test]
    fn percent_above_hundred_is_rejected() {
        assert!(validate_terms(&request(DiscountType::Percent, 101)).is_err());
        assert!(validate_terms(&request(DiscountType::Amount, 101)).is_ok());
    }

    #[test]
    fn end_must_follow_start() {
        let mut req = request(DiscountType::Amount, 5_000);
        req.end_date = req.start_date;

        assert!(matches!(
            validate_terms(&req),
            Err(ServiceError::Validation(_))
        ));
    }
}
