//! Integration scenarios for the passport issuance workflow.
//!
//! Exercises the public service facade and HTTP router end to end: emissions
//! estimation feeding the transport sub-score into scoring, wholesale
//! recompute on update, and the audit export — without reaching into
//! private modules.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use garment_passport::workflows::passport::{
        AnswerMap, OrderSnapshot, PassportId, PassportRecord, PassportRepository,
        PassportService, PassportSubmission, RepositoryError, Waypoint, WaypointSet,
    };

    pub(super) fn wool_route() -> WaypointSet {
        WaypointSet {
            primary: None,
            mill: Some(Waypoint::new(51.5, -0.1, "London", "UK")),
            production: Some(Waypoint::new(49.4719, 17.1128, "Prostějov", "Czechia")),
            warehouse: Some(Waypoint::new(-33.8688, 151.2093, "Sydney", "Australia")),
        }
    }

    /// Equatorial route totalling ~8757 km, which maps to the best transport
    /// sub-score.
    pub(super) fn short_route() -> WaypointSet {
        WaypointSet {
            primary: Some(Waypoint::new(0.0, 0.0, "Test Farm", "Equatoria")),
            mill: Some(Waypoint::new(0.0, 45.0, "Test Mill", "Equatoria")),
            production: Some(Waypoint::new(0.0, 67.5, "Test Atelier", "Equatoria")),
            warehouse: Some(Waypoint::new(0.0, 78.75, "Test Warehouse", "Equatoria")),
        }
    }

    pub(super) fn answers() -> AnswerMap {
        [
            ("p1_rsl", "yes"),
            ("p2_tier2", "mill-001"),
            ("p3_audit", "valid"),
            ("p4_fibre_impact", "A"),
        ]
        .into_iter()
        .collect()
    }

    pub(super) fn max_answers() -> AnswerMap {
        [
            ("p1_woolmark", "yes"),
            ("p1_rws", "yes"),
            ("p1_chemistry", "yes"),
            ("p1_rsl", "yes"),
            ("p1_trims", "yes"),
            ("p2_tier1", "atelier-001"),
            ("p2_tier2", "mill-001"),
            ("p2_tier3", "yes"),
            ("p2_batch", "yes"),
            ("p2_transparency", "yes"),
            ("p3_audit", "valid"),
            ("p3_risk", "low"),
            ("p3_modern_slavery", "yes"),
            ("p3_remedy", "yes"),
            ("p3_wages", "yes"),
            ("p4_fibre_impact", "A"),
            ("p4_longevity", "yes"),
            ("p4_circular", "yes"),
            ("p4_eol", "yes"),
        ]
        .into_iter()
        .collect()
    }

    pub(super) fn submission(waypoints: WaypointSet, answers: AnswerMap) -> PassportSubmission {
        PassportSubmission {
            order: OrderSnapshot {
                order_name: "#1042".to_string(),
                product_title: Some("Two-piece suit".to_string()),
                material: "Wool".to_string(),
            },
            waypoints,
            answers,
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<PassportId, PassportRecord>>>,
    }

    impl PassportRepository for MemoryRepository {
        fn insert(&self, record: PassportRecord) -> Result<PassportRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&record.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: PassportRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&record.id) {
                guard.insert(record.id.clone(), record);
                Ok(())
            } else {
                Err(RepositoryError::NotFound)
            }
        }

        fn fetch(&self, id: &PassportId) -> Result<Option<PassportRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }
    }

    pub(super) fn build_service() -> (PassportService<MemoryRepository>, Arc<MemoryRepository>) {
        let repository = Arc::new(MemoryRepository::default());
        let service = PassportService::new(repository.clone());
        (service, repository)
    }
}

mod scoring {
    use super::common::*;
    use garment_passport::workflows::passport::{TransportMode, TRANSPORT_SCORE_QUESTION};

    #[test]
    fn wool_route_produces_three_legs_and_injects_the_sub_score() {
        let (service, _) = build_service();
        let record = service
            .create(submission(wool_route(), answers()))
            .expect("passport issued");

        let emissions = record.emissions.as_ref().expect("route complete");
        assert_eq!(emissions.legs.len(), 3);
        let modes: Vec<TransportMode> = emissions.legs.iter().map(|leg| leg.mode).collect();
        assert_eq!(
            modes,
            vec![TransportMode::Sea, TransportMode::Road, TransportMode::Air]
        );

        // 34,133 km total puts the route in the zero-score band, and that
        // value must be present in the scored answer map.
        assert_eq!(emissions.transport_score, 0);
        assert_eq!(record.answers.get(TRANSPORT_SCORE_QUESTION), Some("0"));
        let injected = record
            .scores
            .component(TRANSPORT_SCORE_QUESTION)
            .expect("audit row for injected score");
        assert_eq!(injected.points, 0);
    }

    #[test]
    fn partial_answers_sum_across_pillars() {
        let (service, _) = build_service();
        let record = service
            .create(submission(wool_route(), answers()))
            .expect("passport issued");

        assert_eq!(record.scores.pillar("pillar_1").map(|p| p.score), Some(5));
        assert_eq!(record.scores.pillar("pillar_2").map(|p| p.score), Some(5));
        assert_eq!(record.scores.pillar("pillar_3").map(|p| p.score), Some(5));
        assert_eq!(record.scores.pillar("pillar_4").map(|p| p.score), Some(5));
        assert_eq!(record.scores.total, 20);
    }

    #[test]
    fn best_case_inputs_reach_a_perfect_score() {
        let (service, _) = build_service();
        let record = service
            .create(submission(short_route(), max_answers()))
            .expect("passport issued");

        let emissions = record.emissions.as_ref().expect("route complete");
        assert_eq!(emissions.transport_score, 5);
        for pillar in &record.scores.pillars {
            assert_eq!(pillar.score, pillar.max_score);
        }
        assert_eq!(record.scores.total, 100);
    }

    #[test]
    fn caller_supplied_transport_score_is_discarded() {
        let (service, _) = build_service();
        let mut tampered = answers();
        tampered.insert(TRANSPORT_SCORE_QUESTION, "5");

        // No waypoints at all: emissions are not computable, so no sub-score
        // may survive into the scored answers.
        let record = service
            .create(submission(Default::default(), tampered))
            .expect("passport issued");

        assert!(record.emissions.is_none());
        assert_eq!(record.answers.get(TRANSPORT_SCORE_QUESTION), None);
        assert_eq!(record.scores.pillar("pillar_4").map(|p| p.score), Some(5));
    }
}

mod emissions {
    use super::common::*;
    use garment_passport::workflows::passport::{
        PassportRepository, PassportServiceError, Waypoint,
    };

    #[test]
    fn missing_mill_yields_awaiting_waypoints_not_an_error() {
        let (service, _) = build_service();
        let mut route = wool_route();
        route.mill = None;

        let record = service
            .create(submission(route, answers()))
            .expect("passport still issues");
        assert!(record.emissions.is_none());
        assert_eq!(record.emissions_state(), "awaiting_waypoints");
        assert_eq!(record.summary_view().total_emissions_kg, None);
    }

    #[test]
    fn non_finite_coordinates_are_a_validation_failure() {
        let (service, _) = build_service();
        let mut route = wool_route();
        route.production = Some(Waypoint::new(f64::NAN, 17.1128, "Prostějov", "Czechia"));

        match service.create(submission(route, answers())) {
            Err(PassportServiceError::Coordinates(err)) => {
                assert!(err.to_string().contains("latitude"));
            }
            other => panic!("expected coordinate validation failure, got {other:?}"),
        }
    }

    #[test]
    fn update_recomputes_wholesale_when_the_route_completes() {
        let (service, repository) = build_service();
        let mut route = wool_route();
        route.warehouse = None;

        let record = service
            .create(submission(route, answers()))
            .expect("issued without emissions");
        assert!(record.emissions.is_none());

        let updated = service
            .update(&record.id, submission(wool_route(), answers()))
            .expect("recompute succeeds");
        assert!(updated.emissions.is_some());
        assert_eq!(updated.issued_on, record.issued_on);

        let stored = repository
            .fetch(&record.id)
            .expect("repo fetch")
            .expect("record present");
        assert_eq!(stored.emissions, updated.emissions);
        assert_eq!(stored.scores.total, updated.scores.total);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use garment_passport::workflows::passport::{passport_router, PassportService};
    use tower::ServiceExt;

    fn build_router() -> (axum::Router, Arc<PassportService<MemoryRepository>>) {
        let repository = Arc::new(MemoryRepository::default());
        let service = Arc::new(PassportService::new(repository));
        (passport_router(service.clone()), service)
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn post_passports_returns_summary_view() {
        let (router, _) = build_router();
        let payload = submission(wool_route(), answers());

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/passports")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&payload).expect("serialize submission"),
            ))
            .expect("request");

        let response = router.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = read_json(response).await;
        assert!(body.get("passport_id").is_some());
        assert_eq!(body.get("total_score").and_then(Value::as_u64), Some(20));
        assert_eq!(
            body.get("emissions_state").and_then(Value::as_str),
            Some("estimated")
        );
    }

    #[tokio::test]
    async fn get_passport_returns_full_report_view() {
        let (router, service) = build_router();
        let record = service
            .create(submission(wool_route(), answers()))
            .expect("issued");

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/v1/passports/{}", record.id.0))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        let pillars = body
            .get("pillars")
            .and_then(Value::as_array)
            .expect("pillars array");
        assert_eq!(pillars.len(), 4);
        let legs = body
            .pointer("/emissions/legs")
            .and_then(Value::as_array)
            .expect("emissions legs");
        assert_eq!(legs.len(), 3);
    }

    #[tokio::test]
    async fn get_unknown_passport_is_not_found() {
        let (router, _) = build_router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/passports/gtp-999999")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn preview_computes_without_persisting() {
        let (router, service) = build_router();
        let payload = submission(short_route(), answers());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/passports/preview")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&payload).expect("serialize")))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(
            body.pointer("/answers/p4_co2_score").and_then(Value::as_str),
            Some("5")
        );
        assert_eq!(
            body.pointer("/scores/total").and_then(Value::as_u64),
            Some(25)
        );

        // Nothing was stored under any id.
        let probe = garment_passport::workflows::passport::PassportId("gtp-000001".to_string());
        assert!(service.get(&probe).is_err());
    }

    #[tokio::test]
    async fn audit_export_lists_one_row_per_answered_question() {
        let (router, service) = build_router();
        let record = service
            .create(submission(wool_route(), answers()))
            .expect("issued");

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/v1/passports/{}/audit.csv", record.id.0))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .and_then(|value| value.to_str().ok()),
            Some("text/csv; charset=utf-8")
        );

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let text = String::from_utf8(body.to_vec()).expect("utf-8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("question_id,answer,points"));
        // Four answered questions plus the injected transport sub-score.
        assert_eq!(lines.count(), 5);
        assert!(text.contains("p2_tier2,mill-001,5"));
        assert!(text.contains("p4_co2_score,0,0"));
    }
}
