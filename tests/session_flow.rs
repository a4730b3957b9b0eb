#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{console, MockApi, ScratchDir, CODE, MOBILE, TOKEN};
use newsdesk::{
    api::ApiError,
    console::{article::PublishForm, login::LoginForm, Content, View},
    guard::Guarded,
    navigation::{Navigator, HOME_PATH, LOGIN_PATH},
    session::TOKEN_KEY,
    storage::{FileStorage, Storage},
};
use secrecy::{ExposeSecret, SecretString};

#[tokio::test]
async fn login_persists_the_token_across_restarts() -> anyhow::Result<()> {
    let api = MockApi::start().await;
    let scratch = ScratchDir::new();
    let console = console(&api, &scratch);

    console
        .submit_login(&LoginForm::new(MOBILE, CODE))
        .await?;

    let stored = console.tokens().get().map(|token| token.expose_secret().to_string());
    assert_eq!(stored.as_deref(), Some(TOKEN));
    assert_eq!(console.session().cached_token().as_deref(), Some(TOKEN));
    assert_eq!(console.location(), HOME_PATH);

    let request = api.last().expect("login request");
    assert_eq!(request.path, "/v1_0/authorizations");
    assert_eq!(request.body["mobile"], MOBILE);
    assert_eq!(request.body["code"], CODE);
    assert_eq!(request.authorization, None);

    // a second handle over the same file stands in for a restarted process
    let reread = FileStorage::new(scratch.storage_path()).get_item(TOKEN_KEY)?;
    assert_eq!(reread.as_deref(), Some(TOKEN));

    drop(console);
    let restarted = common::console(&api, &scratch);
    assert!(restarted.session().is_authenticated());
    assert_eq!(restarted.session().cached_token().as_deref(), Some(TOKEN));
    Ok(())
}

#[tokio::test]
async fn rejected_login_leaves_the_store_empty() -> anyhow::Result<()> {
    let api = MockApi::start().await;
    let scratch = ScratchDir::new();
    let console = console(&api, &scratch);

    let result = console
        .submit_login(&LoginForm::new(MOBILE, "000000"))
        .await;

    assert_eq!(
        result,
        Err(ApiError::Http {
            status: 400,
            message: "Invalid verification code".to_string(),
        })
    );
    assert!(console.tokens().get().is_none());
    assert!(!console.session().is_authenticated());
    assert_eq!(console.history().reload_count(), 0);
    Ok(())
}

#[tokio::test]
async fn requests_carry_the_stored_bearer_token() -> anyhow::Result<()> {
    let api = MockApi::start().await;
    let scratch = ScratchDir::new();
    let console = console(&api, &scratch);
    console.session().set_token(SecretString::from(TOKEN))?;

    let profile = console.profile().await?.rendered().expect("profile");

    assert_eq!(profile.name, "editor");
    let request = api.last().expect("profile request");
    assert_eq!(request.path, "/v1_0/user/profile");
    assert_eq!(request.authorization.as_deref(), Some("Bearer abc123"));
    assert_eq!(
        console.session().snapshot().user_info.map(|user| user.id),
        Some("1".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn unauthorized_response_signs_the_console_out() -> anyhow::Result<()> {
    let api = MockApi::start().await;
    let scratch = ScratchDir::new();
    let console = console(&api, &scratch);
    console.session().set_token(SecretString::from("expired-token"))?;
    assert!(console.session().is_authenticated());

    let result = console.profile().await;

    assert_eq!(
        result,
        Err(ApiError::Unauthorized {
            message: "Token expired".to_string(),
        })
    );
    assert!(console.tokens().get().is_none());
    assert_eq!(FileStorage::new(scratch.storage_path()).get_item(TOKEN_KEY)?, None);
    assert_eq!(console.location(), LOGIN_PATH);
    assert_eq!(console.history().reload_count(), 1);

    let state = console.session().snapshot();
    assert!(state.token.is_none());
    assert!(state.user_info.is_none());
    Ok(())
}

#[tokio::test]
async fn guarded_view_redirects_without_a_request() -> anyhow::Result<()> {
    let api = MockApi::start().await;
    let scratch = ScratchDir::new();
    let console = console(&api, &scratch);

    let outcome = console.open(HOME_PATH).await?;

    assert_eq!(outcome, Guarded::Redirected(LOGIN_PATH));
    assert_eq!(console.location(), LOGIN_PATH);
    assert!(api.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn signed_in_console_mounts_protected_views() -> anyhow::Result<()> {
    let api = MockApi::start().await;
    let scratch = ScratchDir::new();
    let console = console(&api, &scratch);
    console.submit_login(&LoginForm::new(MOBILE, CODE)).await?;

    let home = console.open(HOME_PATH).await?.rendered().expect("home view");
    let View::Page(page) = home else {
        panic!("expected the home page");
    };
    assert_eq!(page.profile.name, "editor");
    assert!(matches!(page.content, Content::Articles(ref list) if list.total_count == 1));

    let publish = console.open("/publish").await?.rendered().expect("publish view");
    let View::Page(page) = publish else {
        panic!("expected the publish page");
    };
    assert!(matches!(page.content, Content::Publish { ref channels } if channels.len() == 2));
    assert_eq!(console.location(), "/publish");

    let paths: Vec<String> = api.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "/v1_0/authorizations",
            "/v1_0/user/profile",
            "/v1_0/mp/articles",
            "/v1_0/user/profile",
            "/v1_0/channels",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn publish_sends_the_article() -> anyhow::Result<()> {
    let api = MockApi::start().await;
    let scratch = ScratchDir::new();
    let console = console(&api, &scratch);
    console.session().set_token(SecretString::from(TOKEN))?;

    let form = PublishForm {
        title: "Release notes".to_string(),
        channel_id: Some(4),
        content: "<p>body</p>".to_string(),
        cover_type: 0,
        images: Vec::new(),
    };
    let id = console.publish(&form).await?;

    assert_eq!(id, Guarded::Rendered("42".to_string()));
    let request = api.last().expect("publish request");
    assert_eq!(request.path, "/v1_0/mp/articles");
    assert_eq!(request.body["channel_id"], 4);
    assert_eq!(request.body["cover"]["type"], 0);
    Ok(())
}

#[tokio::test]
async fn logout_erases_the_file_entry() -> anyhow::Result<()> {
    let api = MockApi::start().await;
    let scratch = ScratchDir::new();
    let console = console(&api, &scratch);
    console.submit_login(&LoginForm::new(MOBILE, CODE)).await?;

    console.logout()?;

    assert_eq!(FileStorage::new(scratch.storage_path()).get_item(TOKEN_KEY)?, None);
    assert!(!console.session().is_authenticated());
    assert_eq!(console.history().location(), LOGIN_PATH);
    Ok(())
}

#[tokio::test]
async fn signed_out_publish_sends_nothing() -> anyhow::Result<()> {
    let api = MockApi::start().await;
    let scratch = ScratchDir::new();
    let console = console(&api, &scratch);

    let form = PublishForm {
        title: "Release notes".to_string(),
        channel_id: Some(4),
        content: "<p>body</p>".to_string(),
        cover_type: 0,
        images: Vec::new(),
    };
    let outcome = console.publish(&form).await?;

    assert_eq!(outcome, Guarded::Redirected(LOGIN_PATH));
    assert!(console.channels().await?.is_redirect());
    assert!(console.profile().await?.is_redirect());
    assert!(api.requests().is_empty());
    assert_eq!(console.location(), LOGIN_PATH);
    Ok(())
}
