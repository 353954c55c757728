use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::company::{companies_by_sector, companies_in, Company, Sector};

#[derive(Debug, Deserialize)]
pub struct CompaniesQuery {
    pub sector: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SectorGroup {
    pub sector: Sector,
    pub companies: Vec<&'static Company>,
}

#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub total: usize,
    pub sectors: Vec<SectorGroup>,
}

/// GET /api/companies: regional employer directory, optionally one sector.
pub async fn list_companies(
    Query(params): Query<CompaniesQuery>,
) -> Result<Json<CompaniesResponse>, (StatusCode, Json<serde_json::Value>)> {
    let sectors = match params.sector.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => {
            let sector: Sector = raw.parse().map_err(|_| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": format!("Unknown sector: {raw}") })),
                )
            })?;
            vec![SectorGroup {
                sector,
                companies: companies_in(sector),
            }]
        }
        None => companies_by_sector()
            .into_iter()
            .map(|(sector, companies)| SectorGroup { sector, companies })
            .collect(),
    };

    Ok(Json(CompaniesResponse {
        total: sectors.iter().map(|g| g.companies.len()).sum(),
        sectors,
    }))
}
