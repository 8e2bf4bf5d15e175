//! REST API endpoints for nutrition reports

use actix_web::{HttpResponse, get, web};
use chrono::NaiveDate;

use crate::api::error::ApiError;
use crate::service::ReportService;
use crate::service::report::{DailySummary, WeeklyReport};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ApiError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
}

/// Nutrition totals for a single date
#[utoipa::path(
    get,
    path = "/v1/reports/daily/{date}",
    params(
        ("date" = String, Path, description = "Calendar date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Daily summary", body = DailySummary),
        (status = 400, description = "Invalid date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "reports"
)]
#[get("/v1/reports/daily/{date}")]
pub async fn daily_report(
    service: web::Data<ReportService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let date = parse_date(&path.into_inner())?;
    let summary = service.daily(date).await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Weekly report: seven daily summaries ending at the given date
#[utoipa::path(
    get,
    path = "/v1/reports/weekly/{end_date}",
    params(
        ("end_date" = String, Path, description = "Last date of the window (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Weekly report", body = WeeklyReport),
        (status = 400, description = "Invalid date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "reports"
)]
#[get("/v1/reports/weekly/{end_date}")]
pub async fn weekly_report(
    service: web::Data<ReportService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let end = parse_date(&path.into_inner())?;
    let report = service.weekly(end).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(daily_report).service(weekly_report);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_iso_dates() {
        let date = parse_date("2025-11-20").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 11, 20).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("2025/11/20").is_err());
    }
}
