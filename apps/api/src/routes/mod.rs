pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::diagnosis::handlers as diagnosis;
use crate::directory::handlers as experts;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/diagnosis", post(diagnosis::handle_diagnose))
        .route(
            "/api/v1/diagnosis/:session_id",
            get(diagnosis::handle_get_diagnosis),
        )
        .route(
            "/api/v1/diagnosis/:session_id/experts",
            get(experts::handle_list_experts),
        )
        .route(
            "/api/v1/experts/:expert_id/schedule",
            post(experts::handle_schedule),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::diagnosis::models::{DiagnosisResult, GapEntry, PlanModule};
    use crate::diagnosis::provider::DiagnosisProvider;
    use crate::directory::{Directory, ExpertRecord, Specialty};
    use crate::errors::AppError;
    use crate::sessions::SessionStore;

    /// Provider that replies with a fixed diagnosis, standing in for the
    /// remote model.
    struct FixedProvider(DiagnosisResult);

    #[async_trait]
    impl DiagnosisProvider for FixedProvider {
        async fn diagnose(
            &self,
            _api_key: &str,
            _pain_points: &str,
            _strategy_text: &str,
        ) -> Result<DiagnosisResult, AppError> {
            Ok(self.0.clone())
        }
    }

    /// Provider whose every call fails, standing in for a network or parse
    /// failure.
    struct FailingProvider;

    #[async_trait]
    impl DiagnosisProvider for FailingProvider {
        async fn diagnose(
            &self,
            _api_key: &str,
            _pain_points: &str,
            _strategy_text: &str,
        ) -> Result<DiagnosisResult, AppError> {
            Err(AppError::Diagnosis("model returned prose".to_string()))
        }
    }

    fn leadership_diagnosis() -> DiagnosisResult {
        DiagnosisResult {
            diagnosis_summary: "Sales team lacks leadership in middle management.".into(),
            identified_gaps: vec![GapEntry {
                gap: "Leadership".into(),
                severity: 7,
                category: "Blanda".into(),
            }],
            recommended_plan: vec![PlanModule {
                module: "Leadership 101".into(),
                duration: "4h".into(),
                objective: "Delegate and coach effectively".into(),
            }],
            recommended_specialties: vec!["Liderazgo".into()],
        }
    }

    fn expert(id: &str, name: &str, specialty: Specialty) -> ExpertRecord {
        ExpertRecord {
            id: id.into(),
            name: name.into(),
            specialty,
            rating: 4.5,
            hourly_rate: 120,
            email: format!("{}@consultores.example", name.to_lowercase().replace(' ', ".")),
        }
    }

    fn fixed_directory() -> Directory {
        Directory::from_records(vec![
            expert("EXP-100", "Lucia Garcia", Specialty::Liderazgo),
            expert("EXP-101", "Mateo Lopez", Specialty::Ventas),
            expert("EXP-102", "Sofia Torres", Specialty::PythonData),
        ])
    }

    fn test_config() -> Config {
        Config {
            port: 0,
            rust_log: "info".into(),
            inference_url: "http://localhost:0/unused".into(),
            llm_timeout_secs: 5,
            demo_fallback: true,
        }
    }

    fn app_with(provider: Arc<dyn DiagnosisProvider>, sessions: SessionStore) -> Router {
        build_router(AppState {
            provider,
            directory: Arc::new(fixed_directory()),
            sessions,
            config: test_config(),
        })
    }

    const BOUNDARY: &str = "formadiag-test-boundary";

    fn multipart_body(pain_points: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"pain_points\"\r\n\r\n\
             {pain_points}\r\n\
             --{BOUNDARY}--\r\n"
        )
    }

    fn diagnose_request(pain_points: &str, api_key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/v1/diagnosis")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(key) = api_key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(Body::from(multipart_body(pain_points))).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let app = app_with(Arc::new(FixedProvider(leadership_diagnosis())), SessionStore::new());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "formadiag-api");
    }

    #[tokio::test]
    async fn test_missing_credential_is_rejected_before_any_work() {
        let app = app_with(Arc::new(FailingProvider), SessionStore::new());
        let response = app
            .oneshot(diagnose_request("sales team weak on leadership", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_CREDENTIAL");
    }

    #[tokio::test]
    async fn test_empty_pain_points_is_rejected_before_any_work() {
        let app = app_with(Arc::new(FailingProvider), SessionStore::new());
        let response = app
            .oneshot(diagnose_request("   ", Some("gsk_test")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_INPUT");
    }

    /// The end-to-end demo scenario: one gap (Leadership, severity 7), one
    /// plan module, "Liderazgo" recommended — metrics and the specialty
    /// filter must line up with the reply.
    #[tokio::test]
    async fn test_diagnose_then_filter_experts_end_to_end() {
        let sessions = SessionStore::new();
        let app = app_with(Arc::new(FixedProvider(leadership_diagnosis())), sessions);

        let response = app
            .clone()
            .oneshot(diagnose_request("sales team weak on leadership", Some("gsk_test")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["metrics"]["gap_count"], 1);
        assert_eq!(body["metrics"]["module_count"], 1);
        assert_eq!(body["metrics"]["average_severity"], 7.0);
        assert_eq!(body["metrics"]["average_severity_display"], "7.0");
        assert_eq!(body["radar"][0]["axis"], "Leadership");
        assert_eq!(body["radar"][0]["value"], 7);

        let session_id = body["session_id"].as_str().unwrap().to_string();

        // Cached result is re-readable.
        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/api/v1/diagnosis/{session_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Specialty filter: case-insensitive containment, no fallback needed.
        let response = app
            .clone()
            .oneshot(
                Request::get(format!(
                    "/api/v1/diagnosis/{session_id}/experts?specialty=liderazgo"
                ))
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["fallback"], false);
        let experts = body["experts"].as_array().unwrap();
        assert_eq!(experts.len(), 1);
        assert_eq!(experts[0]["specialty"], "Liderazgo");

        // Schedule stub acknowledges without side effects.
        let expert_id = experts[0]["id"].as_str().unwrap().to_string();
        let response = app
            .oneshot(
                Request::post(format!("/api/v1/experts/{expert_id}/schedule"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["simulated"], true);
        assert_eq!(body["expert_id"], expert_id);
    }

    #[tokio::test]
    async fn test_unmatched_filter_falls_back_to_sample_of_three() {
        let sessions = SessionStore::new();
        let app = app_with(Arc::new(FixedProvider(leadership_diagnosis())), sessions);

        let response = app
            .clone()
            .oneshot(diagnose_request("needs", Some("gsk_test")))
            .await
            .unwrap();
        let session_id = body_json(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(
                Request::get(format!(
                    "/api/v1/diagnosis/{session_id}/experts?specialty=Astrofisica"
                ))
                .body(Body::empty())
                .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["fallback"], true);
        // The fixed directory only has 3 records, all sampled.
        assert_eq!(body["experts"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_diagnosis_leaves_cached_result_untouched() {
        let sessions = SessionStore::new();
        let ok_app = app_with(
            Arc::new(FixedProvider(leadership_diagnosis())),
            sessions.clone(),
        );
        let failing_app = app_with(Arc::new(FailingProvider), sessions);

        let session_id = Uuid::new_v4();

        let response = ok_app
            .oneshot(
                Request::post("/api/v1/diagnosis")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .header("x-api-key", "gsk_test")
                    .header("x-session-id", session_id.to_string())
                    .body(Body::from(multipart_body("original needs")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Re-running the action against the same session fails upstream…
        let response = failing_app
            .clone()
            .oneshot(
                Request::post("/api/v1/diagnosis")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .header("x-api-key", "gsk_test")
                    .header("x-session-id", session_id.to_string())
                    .body(Body::from(multipart_body("retry needs")))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "DIAGNOSIS_ERROR");

        // …and the previously cached diagnosis is still served.
        let response = failing_app
            .oneshot(
                Request::get(format!("/api/v1/diagnosis/{session_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["metrics"]["gap_count"], 1);
    }

    #[tokio::test]
    async fn test_unknown_session_and_expert_are_not_found() {
        let app = app_with(Arc::new(FailingProvider), SessionStore::new());

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/api/v1/diagnosis/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(
                Request::post("/api/v1/experts/EXP-999/schedule")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
