mod common;

use anyhow::Result;
use reqwest::StatusCode;

// A tenant admin with every portal permission, plus the GitOps actions
// flag switched on for this server.

fn admin_fixture() -> Vec<(&'static str, String)> {
    let user = serde_json::json!({
        "id": "7c0a4cf4-88a1-44ab-b7d3-64dbd3f0ce55",
        "role": "admin",
        "permissions": ["mail:send", "cms:edit", "cms:publish", "gitops:trigger", "tenant:manage"],
        "tenant_id": "acme",
        "tenants": [{ "id": "acme", "name": "Acme Corp", "role": "owner" }]
    });
    vec![
        ("PORTAL_SESSION_FIXTURE", user.to_string()),
        ("PORTAL_FEATURE_CLOUD_ACTIONS", "on".to_string()),
    ]
}

#[tokio::test]
async fn tenant_admin_loads() -> Result<()> {
    let server = common::ensure_server(&admin_fixture()).await?;
    let client = common::no_redirect_client();

    let res = client
        .get(format!("{}/admin/tenants", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["view"]["id"], "admin.tenants");
    assert_eq!(body["data"]["route"]["extension"], "admin");
    Ok(())
}

#[tokio::test]
async fn member_management_needs_tenant_manage() -> Result<()> {
    let server = common::ensure_server(&admin_fixture()).await?;
    let client = common::no_redirect_client();

    let res = client
        .get(format!("{}/admin/members", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn gitops_actions_open_once_flagged_on() -> Result<()> {
    let server = common::ensure_server(&admin_fixture()).await?;
    let client = common::no_redirect_client();

    let res = client
        .get(format!("{}/cloud_iac/actions", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["view"]["id"], "cloud.actions");
    Ok(())
}

#[tokio::test]
async fn publish_queue_opens_for_admins() -> Result<()> {
    let server = common::ensure_server(&admin_fixture()).await?;
    let client = common::no_redirect_client();

    let res = client
        .get(format!("{}/workshop/publish", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["view"]["id"], "workshop.publish");
    Ok(())
}

#[tokio::test]
async fn sidebar_reflects_the_enabled_flag() -> Result<()> {
    let server = common::ensure_server(&admin_fixture()).await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/navigation/sidebar", server.base_url))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;

    let sections = body["data"]["sections"].as_array().expect("sections");
    let infra = sections
        .iter()
        .find(|s| s["title"] == "Infrastructure")
        .expect("infrastructure section");
    let actions = infra["items"]
        .as_array()
        .expect("items")
        .iter()
        .find(|i| i["path"] == "/cloud_iac/actions")
        .expect("actions item");
    assert_eq!(actions["disabled"], false);
    Ok(())
}
