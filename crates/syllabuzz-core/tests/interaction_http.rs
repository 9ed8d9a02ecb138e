mod common;

use common::{anonymous, logged_in};
use serde_json::json;
use syllabuzz_core::notify::NoticeLevel;
use syllabuzz_core::{InteractionKey, InteractionPhase, ToggleOutcome, ViewScope};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn starring_a_module_is_confirmed() {
    let test = logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/star-module/M1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isStarred": false })))
        .mount(&test.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/star-module"))
        .and(body_json(json!({ "module_id": "M1" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "message": "Module starred successfully" })),
        )
        .expect(1)
        .mount(&test.server)
        .await;

    let resolver = &test.client.interactions;
    let key = InteractionKey::star("M1");
    assert_eq!(resolver.status(&key, &ViewScope::new()).await, Some(false));

    let outcome = resolver.toggle(&key, None);
    assert!(outcome.displayed());
    assert!(resolver.phase(&key).is_pending());

    let result = outcome.settled().await.unwrap();
    assert!(result.confirmed);
    assert!(result.active);
    assert_eq!(resolver.phase(&key), InteractionPhase::Known { active: true });
    assert_eq!(test.notifier.titles(), vec!["Module starred"]);
}

#[tokio::test]
async fn failed_star_reverts_and_notifies() {
    let test = logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/star-module/M1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "active": false })))
        .mount(&test.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/star-module"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Database unavailable" })),
        )
        .mount(&test.server)
        .await;

    let resolver = &test.client.interactions;
    let key = InteractionKey::star("M1");
    resolver.status(&key, &ViewScope::new()).await;

    let result = resolver.toggle(&key, None).settled().await.unwrap();
    assert!(!result.confirmed);
    assert!(!result.active);
    assert!(!resolver.displayed(&key));

    let notices = test.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].title, "Failed to update module star");
    assert_eq!(notices[0].message, "Database unavailable");
}

#[tokio::test]
async fn anonymous_bookmark_makes_no_call() {
    let test = anonymous(None).await;
    let key = InteractionKey::bookmark("a1");

    let outcome = test.client.interactions.toggle(&key, None);
    assert!(matches!(outcome, ToggleOutcome::AuthRequired));
    assert!(!test.client.interactions.displayed(&key));
    assert_eq!(test.request_count().await, 0);
    assert_eq!(test.notifier.titles(), vec!["Authentication required"]);
}

#[tokio::test]
async fn expired_credential_on_background_check_logs_out() {
    let test = logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/bookmark/unrelated/status"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token has expired" })))
        .mount(&test.server)
        .await;

    let key = InteractionKey::bookmark("unrelated");
    let shown = test
        .client
        .interactions
        .status(&key, &ViewScope::new())
        .await;

    assert_eq!(shown, Some(false));
    assert_eq!(test.navigator.routes()[0].path(), "/login");
    assert!(test.stored_token().is_none());
    assert!(!test.client.auth.is_authenticated());
}

#[tokio::test]
async fn bookmark_round_trip_with_module_context() {
    let test = logged_in().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/bookmark"))
        .and(body_json(json!({ "article_id": "a1", "module_id": "m1" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&test.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/auth/bookmark/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&test.server)
        .await;

    let resolver = &test.client.interactions;
    let key = InteractionKey::bookmark("a1");

    let saved = resolver
        .toggle(&key, Some("m1".to_string()))
        .settled()
        .await
        .unwrap();
    assert!(saved.active);

    let removed = resolver.toggle(&key, None).settled().await.unwrap();
    assert!(!removed.active);
    assert_eq!(
        test.notifier.titles(),
        vec!["Article saved", "Article unsaved"]
    );
}

#[tokio::test]
async fn sibling_views_see_toggle() {
    let test = logged_in().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/like"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&test.server)
        .await;

    let resolver = test.client.interactions.clone();
    let mut sibling = resolver.subscribe();
    let key = InteractionKey::like("a9");

    resolver.toggle(&key, None).settled().await.unwrap();

    let first = sibling.recv().await.unwrap();
    assert!(first.phase.is_pending());
    let second = sibling.recv().await.unwrap();
    assert_eq!(second.phase, InteractionPhase::Known { active: true });
    assert!(test.client.interactions.displayed(&key));
}

#[tokio::test]
async fn bookmark_rejected_without_body_still_explains() {
    let test = logged_in().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/bookmark"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&test.server)
        .await;

    let key = InteractionKey::bookmark("a1");
    let result = test
        .client
        .interactions
        .toggle(&key, None)
        .settled()
        .await
        .unwrap();

    assert!(!result.confirmed);
    let err = result.error.expect("server rejection is reported");
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Request failed (status 500)");

    let notices = test.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Failed to save article");
    assert_eq!(notices[0].message, "Bookmark failed");
}
