//! Tests whether the 'health-check' route returns an appropriate status code

use anyhow::Result;
use reqwest::StatusCode;

use crate::helpers::spawn_test_app;

#[tokio::test]
async fn health_check_ok() -> Result<()> {
    let app = spawn_test_app().await?;

    let res = app
        .client
        .get(format!("http://{}/health-check", app.addr))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK, "Healthcheck FAILED!");
    assert!(res.headers().contains_key("x-request-id"));

    Ok(())
}
