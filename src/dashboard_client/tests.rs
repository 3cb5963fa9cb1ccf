use httpmock::Method::GET;
use httpmock::MockServer;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::config::Config;
use crate::types::DashboardError;

use super::{AgentStatus, DashboardClient, Period, SlaMetrics, Trend, DEFAULT_HISTORY_LIMIT};

fn client_for(server: &MockServer) -> DashboardClient {
    let config = Config {
        api_url: server.url("/api/v1"),
        ..Config::default()
    };
    DashboardClient::new(&config).expect("client should build")
}

#[tokio::test]
async fn sla_payload_is_returned_exactly() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/dashboard/sla")
                .query_param("period", "today");
            then.status(200).json_body(json!({
                "success": true,
                "message": "ok",
                "data": { "sla_compliance": 87.5, "calls_within_sla": 35, "total_calls": 40 }
            }));
        })
        .await;

    let sla = client_for(&server)
        .sla(Period::Today)
        .await
        .expect("sla should load")
        .expect("payload present");

    mock.assert_async().await;
    assert_eq!(
        sla,
        SlaMetrics {
            sla_compliance: Some(87.5),
            calls_within_sla: Some(35),
            total_calls: Some(40),
            ..Default::default()
        }
    );
}

#[tokio::test]
async fn missing_data_is_not_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/dashboard/realtime");
            then.status(200)
                .json_body(json!({ "success": true, "message": "no data yet" }));
        })
        .await;

    let realtime = client_for(&server).realtime().await.expect("request ok");
    assert!(realtime.is_none());
}

#[tokio::test]
async fn unsuccessful_envelope_maps_to_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/compare/weekly");
            then.status(200).json_body(json!({
                "success": false,
                "message": "failed",
                "error": { "code": "DATABASE_ERROR", "message": "cdr store unavailable" }
            }));
        })
        .await;

    let err = client_for(&server).compare_weekly().await.unwrap_err();
    match err {
        DashboardError::Api { code, message } => {
            assert_eq!(code, "DATABASE_ERROR");
            assert_eq!(message, "cdr store unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_without_envelope_report_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/agents");
            then.status(502).body("bad gateway");
        })
        .await;

    let err = client_for(&server).agents().await.unwrap_err();
    assert!(matches!(err, DashboardError::Status { status: 502, .. }));
}

#[tokio::test]
async fn list_endpoints_accept_bare_and_keyed_payloads() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/agents");
            then.status(200).json_body(json!({
                "success": true,
                "message": "ok",
                "data": [{ "extension": "1001", "first_name": "Elif", "last_name": "Kaya", "status": "Available" }]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/calls/active");
            then.status(200).json_body(json!({
                "success": true,
                "message": "ok",
                "data": { "calls": [{ "id": "c-1", "agent_ext": "1001", "caller_number": "555", "duration": 12, "status": "answered" }] }
            }));
        })
        .await;

    let client = client_for(&server);
    let agents = client.agents().await.unwrap().unwrap();
    let calls = client.active_calls().await.unwrap().unwrap();

    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0].status, AgentStatus::Available);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "c-1");
}

#[tokio::test]
async fn requests_carry_language_and_query_parameters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/stats/history")
                .query_param("period", "last7days")
                .query_param("limit", "100")
                .header("accept-language", "tr");
            then.status(200).json_body(json!({
                "success": true,
                "message": "ok",
                "data": { "period": "last7days", "period_name": "Son 7 Gün", "calls": [], "total": 0 }
            }));
        })
        .await;

    let history = client_for(&server)
        .call_history(Period::Last7Days, DEFAULT_HISTORY_LIMIT)
        .await
        .unwrap()
        .unwrap();

    mock.assert_async().await;
    assert_eq!(history.period, Period::Last7Days);
    assert!(history.calls.is_empty());
}

#[tokio::test]
async fn agent_paths_are_sanitised() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/stats/agent/1001")
                .query_param("period", "week");
            then.status(200).json_body(json!({
                "success": true,
                "message": "ok",
                "data": {
                    "period": "week",
                    "period_name": "Bu Hafta",
                    "extension": "1001",
                    "statistics": { "agent_ext": "1001", "total_calls": 9, "answered_calls": 8 }
                }
            }));
        })
        .await;

    let stats = client_for(&server)
        .agent_stats(" 1001/", Period::Week)
        .await
        .unwrap()
        .unwrap();

    mock.assert_async().await;
    assert_eq!(stats.statistics.total_calls, 9);
}

#[tokio::test]
async fn monthly_comparison_decodes_trend() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/compare/monthly");
            then.status(200).json_body(json!({
                "success": true,
                "message": "ok",
                "data": {
                    "current_month": { "total_calls": 300 },
                    "previous_month": { "total_calls": 320 },
                    "comparison": { "calls_change": "-6%", "trend": "declining", "summary": "" },
                    "period_name": "Monthly"
                }
            }));
        })
        .await;

    let data = client_for(&server).compare_monthly().await.unwrap().unwrap();
    assert_eq!(data.comparison.trend, Trend::Declining);
    assert_eq!(data.current().map(|s| s.total_calls), Some(300));
}
