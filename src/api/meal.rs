//! REST API endpoints for meal logging and history

use actix_web::{HttpResponse, get, post, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::api::error::ApiError;
use crate::db::models::ListMealsQuery;
use crate::model::{LabelCandidate, MealRecord};
use crate::service::{MealService, ResolverService};

/// Request body for resolving labeler output into a logged meal
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveMealRequest {
    /// Label candidates from the on-device image labeler
    pub labels: Vec<LabelCandidate>,
    /// Calendar date to log the meal for (defaults to today, UTC)
    pub date: Option<NaiveDate>,
}

/// Query parameters for listing meals
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListMealsParams {
    /// Page number (1-indexed, default: 1)
    pub page: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
    /// Filter by calendar date (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
}

/// Paginated response for meals
#[derive(Debug, Serialize, ToSchema)]
pub struct MealListResponse {
    pub meals: Vec<MealRecord>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
}

/// Resolve label candidates into a persisted meal record
#[utoipa::path(
    post,
    path = "/v1/meals",
    request_body = ResolveMealRequest,
    responses(
        (status = 201, description = "Meal resolved and logged", body = MealRecord),
        (status = 404, description = "No candidate yielded a nutrition match"),
        (status = 500, description = "Internal server error")
    ),
    tag = "meals"
)]
#[post("/v1/meals")]
pub async fn resolve_meal(
    service: web::Data<ResolverService>,
    body: web::Json<ResolveMealRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let date = request.date.unwrap_or_else(|| Utc::now().date_naive());

    let record = service.resolve(&request.labels, date).await?;

    Ok(HttpResponse::Created().json(record))
}

/// List logged meals with pagination and filters
#[utoipa::path(
    get,
    path = "/v1/meals",
    params(ListMealsParams),
    responses(
        (status = 200, description = "Meals retrieved successfully", body = MealListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "meals"
)]
#[get("/v1/meals")]
pub async fn list_meals(
    service: web::Data<MealService>,
    query: web::Query<ListMealsParams>,
) -> Result<HttpResponse, ApiError> {
    let db_query = ListMealsQuery {
        page: query.page,
        page_size: query.page_size,
        date: query.date,
    };

    let paginated = service.list(db_query).await?;

    Ok(HttpResponse::Ok().json(MealListResponse {
        meals: paginated.meals,
        page: paginated.page,
        page_size: paginated.page_size,
        total_count: paginated.total_count,
        total_pages: paginated.total_pages,
    }))
}

/// Get a logged meal by ID
#[utoipa::path(
    get,
    path = "/v1/meals/{id}",
    params(
        ("id" = i64, Path, description = "Meal ID")
    ),
    responses(
        (status = 200, description = "Meal retrieved successfully", body = MealRecord),
        (status = 404, description = "Meal not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "meals"
)]
#[get("/v1/meals/{id}")]
pub async fn get_meal(
    service: web::Data<MealService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let meal = service.get_by_id(id).await?;

    Ok(HttpResponse::Ok().json(meal))
}

/// Configure meal routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(resolve_meal).service(list_meals).service(get_meal);
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        resolve_meal,
        list_meals,
        get_meal,
        crate::api::report::daily_report,
        crate::api::report::weekly_report,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    tags(
        (name = "meals", description = "Meal logging and history"),
        (name = "reports", description = "Daily and weekly nutrition reports"),
        (name = "health", description = "Health probes")
    )
)]
pub struct ApiDoc;
