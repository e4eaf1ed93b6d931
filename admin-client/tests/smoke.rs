use std::time::{SystemTime, UNIX_EPOCH};

use admin_client::{AdminClient, AdminClientError, ContentQuery, NewContent};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires a running admin server"]
async fn http_admin_flow() {
    let base_url =
        std::env::var("ADMIN_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "motdepasse-admin".to_string());

    let mut client = AdminClient::new(base_url);

    let token = client
        .login(&email, &password, false)
        .await
        .expect("login must succeed");
    assert!(!token.is_empty());
    assert!(client.token().is_some());

    let session = client.me().await.expect("me must succeed");
    assert_eq!(session.email, email);

    let suffix = unique_suffix();
    let title = format!("Smoke {suffix}");
    let created = client
        .create_content(&NewContent {
            title: title.clone(),
            description: Some("créé par le test de fumée".to_string()),
            ..NewContent::default()
        })
        .await
        .expect("create_content must succeed");
    assert_eq!(created.title, title);
    assert_eq!(created.status, "DRAFT");

    let fetched = client
        .get_content(created.id)
        .await
        .expect("get_content must succeed");
    assert_eq!(fetched.id, created.id);

    let published = client
        .publish_content(created.id)
        .await
        .expect("publish_content must succeed");
    assert_eq!(published.status, "PUBLISHED");
    assert!(published.published_at.is_some());

    let listed = client
        .list_contents(&ContentQuery {
            q: Some(suffix.clone()),
            ..ContentQuery::default()
        })
        .await
        .expect("list_contents must succeed");
    assert!(listed.data.iter().any(|content| content.id == created.id));

    let results = client
        .search(&suffix, None)
        .await
        .expect("search must succeed");
    assert!(results.contents.iter().any(|content| content.id == created.id));

    client
        .delete_content(created.id)
        .await
        .expect("delete_content must succeed");

    let after_delete = client.get_content(created.id).await;
    assert!(matches!(after_delete, Err(AdminClientError::NotFound)));

    client.logout().await.expect("logout must succeed");
    assert!(client.token().is_none());

    let after_logout = client.me().await;
    assert!(matches!(after_logout, Err(AdminClientError::Unauthorized)));
}
