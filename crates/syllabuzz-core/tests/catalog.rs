mod common;

use common::{anonymous, article_json, logged_in};
use serde_json::{Value, json};
use syllabuzz_core::{ArticleQuery, BOOKMARK_PAGE_SIZE, ClientError};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn bookmarks(range: std::ops::Range<usize>) -> Value {
    let items: Vec<Value> = range
        .map(|i| {
            json!({
                "bookmark_id": format!("b{i}"),
                "article": article_json(&format!("a{i}")),
                "created_at": "2024-03-05T10:00:00Z"
            })
        })
        .collect();
    json!({ "bookmarks": items })
}

#[tokio::test]
async fn blank_search_is_rejected_locally() {
    let test = anonymous(None).await;
    let err = test.client.catalog.search("   ", None, None).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidInput(_)));
    assert_eq!(test.request_count().await, 0);
}

#[tokio::test]
async fn search_passes_query() {
    let test = anonymous(None).await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "rust async"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "articles": [article_json("a1")] })),
        )
        .expect(1)
        .mount(&test.server)
        .await;

    let articles = test
        .client
        .catalog
        .search(" rust async ", None, None)
        .await
        .unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].published_label(), "Mar 5, 2024");
}

#[tokio::test]
async fn articles_filter_by_category() {
    let test = anonymous(None).await;
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .and(query_param("category", "CS101"))
        .and(query_param("limit", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "articles": [article_json("a1"), article_json("a2")] })),
        )
        .expect(1)
        .mount(&test.server)
        .await;

    let query = ArticleQuery {
        category: Some("CS101".to_string()),
        limit: Some(5),
        skip: None,
    };
    let articles = test.client.catalog.articles(&query).await.unwrap();
    assert_eq!(articles.len(), 2);
}

#[tokio::test]
async fn trending_passes_window() {
    let test = anonymous(None).await;
    Mock::given(method("GET"))
        .and(path("/api/trending"))
        .and(query_param("days", "7"))
        .and(query_param("limit", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "trending": [article_json("t1")] })),
        )
        .mount(&test.server)
        .await;

    let trending = test.client.catalog.trending(Some(7), Some(3)).await.unwrap();
    assert_eq!(trending[0].id, "t1");
}

#[tokio::test]
async fn bookmarks_require_identity() {
    let test = anonymous(None).await;
    let err = test.client.catalog.bookmarks(12, 0).await.unwrap_err();
    assert!(err.is_auth_required());
    let err = test.client.catalog.starred_modules().await.unwrap_err();
    assert!(err.is_auth_required());
    assert_eq!(test.request_count().await, 0);
}

#[tokio::test]
async fn bookmark_pager_stops_on_short_page() {
    let test = logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/bookmarks"))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bookmarks(0..12)))
        .mount(&test.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/bookmarks"))
        .and(query_param("skip", "12"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bookmarks(12..15)))
        .mount(&test.server)
        .await;

    let mut pager = test.client.bookmark_pager();
    assert_eq!(pager.first_page().await.unwrap().len(), BOOKMARK_PAGE_SIZE as usize);
    assert!(pager.has_more());

    let next = pager.next_page().await.unwrap();
    assert_eq!(next.len(), 3);
    assert_eq!(next[0].article.id, "a12");
    assert!(!pager.has_more());
    assert_eq!(pager.items().len(), 15);

    assert!(pager.next_page().await.unwrap().is_empty());
    assert!(pager.remove("a0"));
    assert_eq!(pager.items().len(), 14);
}

#[tokio::test]
async fn record_view_is_best_effort() {
    let test = anonymous(None).await;
    assert!(!test.client.catalog.record_view("a1", None).await);
    assert_eq!(test.request_count().await, 0);

    let test = logged_in().await;
    Mock::given(method("POST"))
        .and(path("/api/interaction"))
        .and(body_json(json!({
            "user_id": "u1",
            "article_id": "a1",
            "module_id": "m1",
            "type": "view"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&test.server)
        .await;
    assert!(test.client.catalog.record_view("a1", Some("m1")).await);
}

#[tokio::test]
async fn record_view_swallows_failures() {
    let test = logged_in().await;
    Mock::given(method("POST"))
        .and(path("/api/interaction"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&test.server)
        .await;
    assert!(!test.client.catalog.record_view("a1", None).await);
}

#[tokio::test]
async fn user_recommendations_use_identity() {
    let test = logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/recommendations/u1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "recommendations": [article_json("r1")] })),
        )
        .expect(1)
        .mount(&test.server)
        .await;

    let recommended = test.client.catalog.user_recommendations(None).await.unwrap();
    assert_eq!(recommended[0].id, "r1");
}
