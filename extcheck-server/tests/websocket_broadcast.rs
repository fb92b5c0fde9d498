use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum_test::TestWebSocket;
use extcheck_contracts::routes::{self, extensions};
use serde_json::{Value, json};

#[path = "support/mod.rs"]
mod support;
use support::{build_http_test_app, test_config};

async fn next_frame(socket: &mut TestWebSocket) -> Result<Value> {
    tokio::time::timeout(Duration::from_secs(5), socket.receive_json::<Value>())
        .await
        .context("timed out waiting for a broadcast frame")
}

#[tokio::test]
async fn single_item_changes_broadcast_full_snapshots() -> Result<()> {
    let app = build_http_test_app(test_config())?;
    let mut socket = app
        .server
        .get_websocket(routes::WEBSOCKET)
        .await
        .into_websocket()
        .await;

    app.server
        .post(extensions::ADD_CUSTOM)
        .add_query_param(extensions::ADD_CUSTOM_PARAM, "PDF")
        .await
        .assert_status_ok();
    assert_eq!(
        next_frame(&mut socket).await?,
        json!({"type": "full", "fixed": [], "custom": ["pdf"], "count": 1})
    );

    app.server
        .delete(&extensions::fixed_item("doesnotexist"))
        .await
        .assert_status_ok();
    assert_eq!(
        next_frame(&mut socket).await?,
        json!({"type": "full", "fixed": [], "custom": ["pdf"], "count": 1})
    );
    Ok(())
}

#[tokio::test]
async fn batch_broadcasts_one_delta() -> Result<()> {
    let app = build_http_test_app(test_config())?;
    let mut socket = app
        .server
        .get_websocket(routes::WEBSOCKET)
        .await
        .into_websocket()
        .await;

    app.server
        .patch(extensions::FIXED_BATCH)
        .json(&json!({"checked": ["EXE", "bat"], "unchecked": ["cmd"]}))
        .await
        .assert_status_ok();
    app.server
        .post(&extensions::fixed_item("js"))
        .await
        .assert_status_ok();

    // the delta echoes the request lists as sent
    assert_eq!(
        next_frame(&mut socket).await?,
        json!({
            "type": "delta",
            "fixedAdded": ["EXE", "bat"],
            "fixedRemoved": ["cmd"]
        })
    );
    // followed directly by the next change, no per-item frames in between
    let next = next_frame(&mut socket).await?;
    assert_eq!(next["type"], "full");
    assert_eq!(next["fixed"], json!(["exe", "bat", "js"]));
    Ok(())
}

#[tokio::test]
async fn every_subscriber_receives_every_frame() -> Result<()> {
    let app = build_http_test_app(test_config())?;
    let mut first = app
        .server
        .get_websocket(routes::WEBSOCKET)
        .await
        .into_websocket()
        .await;
    let mut second = app
        .server
        .get_websocket(routes::WEBSOCKET)
        .await
        .into_websocket()
        .await;

    app.server
        .post(&extensions::fixed_item("exe"))
        .await
        .assert_status_ok();

    let expected =
        json!({"type": "full", "fixed": ["exe"], "custom": [], "count": 0});
    assert_eq!(next_frame(&mut first).await?, expected);
    assert_eq!(next_frame(&mut second).await?, expected);
    Ok(())
}

#[tokio::test]
async fn failed_requests_do_not_broadcast() -> Result<()> {
    let app = build_http_test_app(test_config())?;
    let mut socket = app
        .server
        .get_websocket(routes::WEBSOCKET)
        .await
        .into_websocket()
        .await;

    app.server
        .post(extensions::ADD_CUSTOM)
        .add_query_param(extensions::ADD_CUSTOM_PARAM, "mp4")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server
        .post(&extensions::fixed_item("exe"))
        .await
        .assert_status_ok();

    // the first frame seen is the fixed save, not the rejected add
    let frame = next_frame(&mut socket).await?;
    assert_eq!(frame["fixed"], json!(["exe"]));
    Ok(())
}
