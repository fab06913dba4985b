use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::passport::{PassportError, PassportId};
use crate::scoring::RawSignals;
use crate::service::{TrustService, TrustServiceError};
use crate::sources::{PersonaId, SignalSource};

/// Router builder exposing the scoring, business and passport endpoints.
pub fn trust_router<S>(service: Arc<TrustService<S>>) -> Router
where
    S: SignalSource + 'static,
{
    Router::new()
        .route("/api/v1/personas", get(personas_handler::<S>))
        .route("/api/v1/score", post(score_raw_handler::<S>))
        .route("/api/v1/score/:persona_id", get(score_handler::<S>))
        .route("/api/v1/signals/:persona_id", get(signals_handler::<S>))
        .route(
            "/api/v1/business/assessment/:persona_id",
            get(business_handler::<S>),
        )
        .route("/api/v1/passport", post(issue_passport_handler::<S>))
        .route(
            "/api/v1/passport/:passport_id",
            get(passport_handler::<S>).delete(revoke_passport_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePassportRequest {
    pub persona_id: String,
}

fn error_response(error: TrustServiceError) -> Response {
    let status = match &error {
        TrustServiceError::PersonaNotFound(_) => StatusCode::NOT_FOUND,
        TrustServiceError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TrustServiceError::Passport(PassportError::NotFound(_)) => StatusCode::NOT_FOUND,
        TrustServiceError::Passport(PassportError::Expired { .. }) => StatusCode::GONE,
        TrustServiceError::Passport(PassportError::LifetimeOutOfRange { .. }) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        TrustServiceError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}

fn parse_passport_id(raw: &str) -> Result<PassportId, Response> {
    raw.parse::<PassportId>().map_err(|_| {
        let payload = json!({
            "error": format!("'{raw}' is not a valid passport id"),
        });
        (StatusCode::BAD_REQUEST, Json(payload)).into_response()
    })
}

pub(crate) async fn personas_handler<S>(State(service): State<Arc<TrustService<S>>>) -> Response
where
    S: SignalSource + 'static,
{
    match service.personas() {
        Ok(personas) => (StatusCode::OK, Json(personas)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<TrustService<S>>>,
    Path(persona_id): Path<String>,
) -> Response
where
    S: SignalSource + 'static,
{
    match service.score(&PersonaId(persona_id)) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn score_raw_handler<S>(
    State(service): State<Arc<TrustService<S>>>,
    Json(raw): Json<RawSignals>,
) -> Response
where
    S: SignalSource + 'static,
{
    match service.score_raw(&raw) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn signals_handler<S>(
    State(service): State<Arc<TrustService<S>>>,
    Path(persona_id): Path<String>,
) -> Response
where
    S: SignalSource + 'static,
{
    match service.signals(&PersonaId(persona_id)) {
        Ok(signals) => (StatusCode::OK, Json(signals)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn business_handler<S>(
    State(service): State<Arc<TrustService<S>>>,
    Path(persona_id): Path<String>,
) -> Response
where
    S: SignalSource + 'static,
{
    match service.business_assessment(&PersonaId(persona_id)) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn issue_passport_handler<S>(
    State(service): State<Arc<TrustService<S>>>,
    Json(request): Json<IssuePassportRequest>,
) -> Response
where
    S: SignalSource + 'static,
{
    match service.issue_passport(&PersonaId(request.persona_id), Utc::now()) {
        Ok(passport) => (StatusCode::CREATED, Json(passport)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn passport_handler<S>(
    State(service): State<Arc<TrustService<S>>>,
    Path(passport_id): Path<String>,
) -> Response
where
    S: SignalSource + 'static,
{
    let id = match parse_passport_id(&passport_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.passport(&id, Utc::now()) {
        Ok(passport) => (StatusCode::OK, Json(passport)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn revoke_passport_handler<S>(
    State(service): State<Arc<TrustService<S>>>,
    Path(passport_id): Path<String>,
) -> Response
where
    S: SignalSource + 'static,
{
    let id = match parse_passport_id(&passport_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.revoke_passport(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passport::{PassportConfig, PassportStore};
    use crate::scoring::ScoringEngine;
    use crate::sources::MockPersonaSource;
    use serde_json::Value;

    fn service() -> Arc<TrustService<MockPersonaSource>> {
        Arc::new(TrustService::new(
            Arc::new(MockPersonaSource::default()),
            ScoringEngine::default(),
            PassportStore::new(PassportConfig::default()),
        ))
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn score_handler_returns_not_found_for_unknown_persona() {
        let response = score_handler(State(service()), Path("ghost".to_string())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json_body(response).await;
        assert_eq!(body["error"], "persona 'ghost' not found");
    }

    #[tokio::test]
    async fn score_raw_handler_rejects_invalid_counts() {
        let mut raw = MockPersonaSource::default().personas()[1].raw.clone();
        raw.payment.on_time_count = raw.payment.total_count + 1;

        let response = score_raw_handler(State(service()), Json(raw)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn passport_handler_rejects_malformed_ids() {
        let response = passport_handler(State(service()), Path("abc".to_string())).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn issue_then_revoke_passport() {
        let service = service();
        let request = IssuePassportRequest {
            persona_id: "maya-chen".to_string(),
        };

        let response = issue_passport_handler(State(service.clone()), Json(request)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json_body(response).await;
        let id = body["id"].as_str().expect("id string").to_string();

        let response = revoke_passport_handler(State(service.clone()), Path(id.clone())).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = passport_handler(State(service), Path(id)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
