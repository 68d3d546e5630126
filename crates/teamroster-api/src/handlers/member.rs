//! Member search handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use teamroster_core::error::AppError;
use teamroster_core::types::Page;
use teamroster_entity::{MemberSearchCondition, MemberTeamDto};

use crate::error::ApiError;
use crate::extractors::PageParams;
use crate::state::AppState;

/// GET /v1/members
///
/// Every member matching the condition, joined with its team.
pub async fn search_members_v1(
    State(state): State<AppState>,
    condition: Result<Query<MemberSearchCondition>, QueryRejection>,
) -> Result<Json<Vec<MemberTeamDto>>, ApiError> {
    let Query(condition) = condition.map_err(query_error)?;
    let rows = state.member_search.search(&condition).await?;
    Ok(Json(rows))
}

/// GET /v2/members
///
/// One page of matching members. The paging parameters share the query
/// string with the search fields.
pub async fn search_members_v2(
    State(state): State<AppState>,
    condition: Result<Query<MemberSearchCondition>, QueryRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<MemberTeamDto>>, ApiError> {
    let Query(condition) = condition.map_err(query_error)?;
    let Query(params) = params.map_err(query_error)?;

    let page = params.to_page_request(&state.config.paging)?;
    let order = params.order()?;

    let result = state
        .member_search
        .search_page(&condition, page, &order)
        .await?;
    Ok(Json(result))
}

/// Malformed query strings get the JSON error body like any other
/// validation failure.
fn query_error(rejection: QueryRejection) -> AppError {
    AppError::validation(rejection.body_text())
}
