mod common;

use anyhow::Result;
use reqwest::StatusCode;

// A regular tenant member: can read mail, send mail and edit drafts, but
// holds no operator/admin role.

fn member_fixture() -> Vec<(&'static str, String)> {
    let user = serde_json::json!({
        "id": "2f1d2b9c-41f3-4f2e-a1c7-09a8e5b6d301",
        "role": "user",
        "permissions": ["mail:send", "cms:edit"],
        "tenant_id": "acme",
        "tenants": [{ "id": "acme", "name": "Acme Corp" }]
    });
    vec![("PORTAL_SESSION_FIXTURE", user.to_string())]
}

#[tokio::test]
async fn mail_loads_for_members() -> Result<()> {
    let server = common::ensure_server(&member_fixture()).await?;
    let client = common::no_redirect_client();

    let res = client
        .get(format!("{}/mail", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["view"]["id"], "mail.inbox");
    assert_eq!(body["data"]["access"]["role"], "user");
    assert_eq!(body["data"]["access"]["tenant_id"], "acme");
    Ok(())
}

#[tokio::test]
async fn compose_needs_only_the_send_permission() -> Result<()> {
    let server = common::ensure_server(&member_fixture()).await?;
    let client = common::no_redirect_client();

    let res = client
        .get(format!("{}/mail/compose", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn mail_settings_bounce_members_back_to_mail() -> Result<()> {
    let server = common::ensure_server(&member_fixture()).await?;
    let client = common::no_redirect_client();

    let res = client
        .get(format!("{}/mail/settings", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/mail")
    );
    Ok(())
}

#[tokio::test]
async fn workshop_editor_opens_with_cms_edit() -> Result<()> {
    let server = common::ensure_server(&member_fixture()).await?;
    let client = common::no_redirect_client();

    let res = client
        .get(format!("{}/workshop/launch-notes-q3", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["view"]["id"], "workshop.drafts");
    Ok(())
}

#[tokio::test]
async fn publish_queue_bounces_members_to_workshop() -> Result<()> {
    let server = common::ensure_server(&member_fixture()).await?;
    let client = common::no_redirect_client();

    let res = client
        .get(format!("{}/workshop/publish", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/workshop")
    );
    Ok(())
}

#[tokio::test]
async fn admin_surfaces_bounce_members_home() -> Result<()> {
    let server = common::ensure_server(&member_fixture()).await?;
    let client = common::no_redirect_client();

    let res = client
        .get(format!("{}/admin/tenants", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok()),
        Some("/")
    );
    Ok(())
}

#[tokio::test]
async fn whoami_echoes_the_session() -> Result<()> {
    let server = common::ensure_server(&member_fixture()).await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/session/whoami", server.base_url))
        .send()
        .await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["authenticated"], true);
    assert_eq!(body["data"]["user"]["role"], "user");
    assert_eq!(body["data"]["user"]["tenant_id"], "acme");
    Ok(())
}

#[tokio::test]
async fn page_data_api_reports_forbidden_for_members() -> Result<()> {
    let server = common::ensure_server(&member_fixture()).await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/pages/admin/tenants", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}
