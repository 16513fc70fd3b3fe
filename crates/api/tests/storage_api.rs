//! HTTP-level integration tests for storage health report ingestion.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, record_storage};
use sqlx::PgPool;

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn minimal_report_is_stored_with_defaults(pool: PgPool) {
    let data = record_storage(&pool, serde_json::json!({ "server_ip": "10.0.1.1" })).await;
    let server_id = data["server_id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/storage/{server_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let report = &json["data"][0];
    assert_eq!(report["total_alerts"], 0);
    assert_eq!(report["critical_alerts"], 0);
    assert_eq!(report["warning_alerts"], 0);
    assert_eq!(report["raid_status"], true);
    assert_eq!(report["smart_status"], true);
    assert_eq!(report["filesystem_status"], true);
    assert_eq!(report["network_status"], true);
    assert!(report["disks_over_threshold"].is_null());
    assert!(report["full_report"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn structured_fields_round_trip(pool: PgPool) {
    let data = record_storage(
        &pool,
        serde_json::json!({
            "server_ip": "10.0.1.2",
            "total_alerts": 2,
            "critical_alerts": 1,
            "warning_alerts": 1,
            "critical_disk_mount": "/var",
            "critical_disk_usage": 97.5,
            "disks_over_threshold": [
                { "mount_point": "/var", "filesystem": "/dev/sda2", "usage": 97.5, "free": "3G" }
            ],
            "top_folders": [{ "path": "/var/log", "size": "40G" }],
            "smart_status": false,
            "iowait_percent": 12.0,
            "summary": "1 critical, 1 warning"
        }),
    )
    .await;
    let server_id = data["server_id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/storage/{server_id}")).await).await;
    let report = &json["data"][0];

    assert_eq!(report["critical_disk_mount"], "/var");
    assert_eq!(report["smart_status"], false);
    assert_eq!(report["raid_status"], true);
    let disk = &report["disks_over_threshold"][0];
    assert_eq!(disk["mount"], "/var");
    assert_eq!(disk["device"], "/dev/sda2");
    assert_eq!(disk["usage_percent"], 97.5);
    assert_eq!(disk["free"], "3G");
    assert_eq!(report["top_folders"][0]["path"], "/var/log");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_report_is_rejected_without_side_effects(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/storage",
        serde_json::json!({
            "total_alerts": -1,
            "raid_status": "degraded",
            "disks_over_threshold": [{ "mount": "/" }]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<&str> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"server_ip"));
    assert!(fields.contains(&"total_alerts"));
    assert!(fields.contains(&"raid_status"));
    assert!(fields.contains(&"disks_over_threshold[0]"));

    let servers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM servers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(servers, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_snapshot_write_leaves_no_storage_rows(pool: PgPool) {
    sqlx::query(
        "ALTER TABLE current_storage_health ADD CONSTRAINT ck_few_critical CHECK (critical_alerts < 5)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/storage",
        serde_json::json!({ "server_ip": "10.0.1.9", "critical_alerts": 9 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");

    assert_eq!(count(&pool, "servers").await, 0);
    assert_eq!(count(&pool, "storage_health").await, 0);
    assert_eq!(count(&pool, "current_storage_health").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reports_are_listed_newest_first_and_limited(pool: PgPool) {
    let mut ids = Vec::new();
    for critical in 0..3 {
        let data = record_storage(
            &pool,
            serde_json::json!({ "server_ip": "10.0.1.3", "critical_alerts": critical }),
        )
        .await;
        ids.push(data["id"].as_i64().unwrap());
    }
    let server_id: i64 =
        sqlx::query_scalar("SELECT id FROM servers WHERE ip_address = '10.0.1.3'")
            .fetch_one(&pool)
            .await
            .unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/storage/{server_id}?limit=2")).await).await;
    let listed: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, vec![ids[2], ids[1]]);

    let (report_id, critical): (i64, i32) = sqlx::query_as(
        "SELECT report_id, critical_alerts FROM current_storage_health WHERE server_id = $1",
    )
    .bind(server_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(report_id, ids[2]);
    assert_eq!(critical, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn storage_report_registers_unknown_server(pool: PgPool) {
    record_storage(&pool, serde_json::json!({ "server_ip": "10.0.1.4" })).await;

    let metrics: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM health_metrics")
        .fetch_one(&pool)
        .await
        .unwrap();
    let servers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM servers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(servers, 1);
    assert_eq!(metrics, 0);
}
