use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;

use super::normalize_tags;
use super::AgendaData;
use crate::domain::agenda::models::AgendaFilter;
use crate::domain::agenda::ports::AgendaServicePort;
use crate::domain::user::models::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// `GET /api/agenda?date_from=...&date_to=...&q=hearing&tags=court,urgent`
#[derive(Debug, Default, Deserialize)]
pub struct ListEventsParams {
    date_from: Option<DateTime<Utc>>,
    date_to: Option<DateTime<Utc>>,
    q: Option<String>,
    /// Comma-separated.
    tags: Option<String>,
}

impl From<ListEventsParams> for AgendaFilter {
    fn from(params: ListEventsParams) -> Self {
        AgendaFilter {
            date_from: params.date_from,
            date_to: params.date_to,
            query: params
                .q
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            tags: params
                .tags
                .map(|tags| normalize_tags(tags.split(',').map(str::to_string)))
                .unwrap_or_default(),
        }
    }
}

pub async fn list_events(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<ListEventsParams>,
) -> Result<ApiSuccess<Vec<AgendaData>>, ApiError> {
    state
        .agenda_service
        .list_events(&principal, params.into())
        .await
        .map_err(ApiError::from)
        .map(|events| {
            let data: Vec<AgendaData> = events.iter().map(|e| e.into()).collect();
            ApiSuccess::new(StatusCode::OK, data)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_to_filter() {
        let filter = AgendaFilter::from(ListEventsParams {
            q: Some("  ".to_string()),
            tags: Some("court, urgent,".to_string()),
            ..Default::default()
        });

        assert_eq!(filter.query, None);
        assert_eq!(filter.tags, vec!["court", "urgent"]);
    }
}
