mod common;

use axum::http::{Method, StatusCode};
use common::{build_test_app, create, encode, get, post, send};
use serde_json::json;

#[tokio::test]
async fn create_get_delete_round_trip() {
    let app = build_test_app();
    let (status, created) =
        post(&app, "/quakes", json!({"name": "Test Quake", "mw": 7.2})).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["name"], "Test Quake");
    assert_eq!(created["mw"], 7.2);

    let (status, fetched) = get(&app, &format!("/quakes/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send(&app, Method::DELETE, &format!("/quakes/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = get(&app, &format!("/quakes/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn patch_where_counts_and_flags_matches() {
    let app = build_test_app();
    for (name, mw) in [("Tohoku", 9.1), ("Nias", 8.6), ("Minor", 5.4), ("Edge", 7.0)] {
        create(&app, "/quakes", json!({"name": name, "mw": mw})).await;
    }
    create(&app, "/quakes", json!({"name": "Unrated"})).await;

    let strong = encode(&json!({"mw": {"gt": 7}}));
    let (_, before) = get(&app, &format!("/quakes/count?where={}", strong)).await;
    assert_eq!(before, json!({"count": 2}));

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/quakes?where={}", strong),
        Some(json!({"noaaTsunami": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"count": 2}));

    let flagged = encode(&json!({"where": {"noaaTsunami": true}, "order": "name ASC"}));
    let (_, rows) = get(&app, &format!("/quakes?filter={}", flagged)).await;
    let names: Vec<_> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Nias", "Tohoku"]);
}

#[tokio::test]
async fn patch_by_id_merges_and_put_replaces() {
    let app = build_test_app();
    let id = create(
        &app,
        "/tsunami-sources",
        json!({"year": 2004, "month": 12, "country": "INDONESIA", "primaryMagnitude": 9.1}),
    )
    .await;
    let uri = format!("/tsunami-sources/{}", id);

    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({"deaths": 227899}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, merged) = get(&app, &uri).await;
    assert_eq!(merged["deaths"], 227899);
    assert_eq!(merged["country"], "INDONESIA");

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({"year": 2004}))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, replaced) = get(&app, &uri).await;
    assert_eq!(replaced, json!({"id": id, "year": 2004}));
}

#[tokio::test]
async fn count_equals_find_length() {
    let app = build_test_app();
    for i in 0..4 {
        create(&app, "/tsunami-runups", json!({"infoSource": "NGDC", "year": 2000 + i})).await;
    }
    let (_, rows) = get(&app, "/tsunami-runups").await;
    let (_, count) = get(&app, "/tsunami-runups/count").await;
    assert_eq!(count["count"], rows.as_array().unwrap().len() as u64);
    assert_eq!(count["count"], 4);
}

#[tokio::test]
async fn find_pages_orders_and_projects() {
    let app = build_test_app();
    for (name, mw) in [("a", 6.0), ("b", 8.0), ("c", 7.0)] {
        create(&app, "/quakes", json!({"name": name, "mw": mw})).await;
    }
    let filter = encode(&json!({"order": ["mw DESC"], "limit": 2, "fields": {"name": true}}));
    let (status, rows) = get(&app, &format!("/quakes?filter={}", filter)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows, json!([{"name": "b"}, {"name": "c"}]));

    let filter = encode(&json!({
        "order": "mw ASC",
        "skip": 1,
        "fields": {"mw": false, "id": false}
    }));
    let (_, rows) = get(&app, &format!("/quakes?filter={}", filter)).await;
    assert_eq!(rows, json!([{"name": "c"}, {"name": "b"}]));
}

#[tokio::test]
async fn find_by_id_honors_fields_only() {
    let app = build_test_app();
    let id = create(&app, "/quakes", json!({"name": "x", "mw": 6.1})).await;
    let filter = encode(&json!({"fields": ["mw"]}));
    let (status, body) = get(&app, &format!("/quakes/{}?filter={}", id, filter)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"mw": 6.1}));
}

#[tokio::test]
async fn dates_are_normalized_and_queryable() {
    let app = build_test_app();
    let (_, created) = post(
        &app,
        "/quakes",
        json!({"name": "Tohoku", "originTime": "2011-03-11T14:46:24+09:00"}),
    )
    .await;
    assert_eq!(created["originTime"], "2011-03-11T05:46:24.000Z");
    let filter = encode(&json!({"where": {"originTime": {"gte": "2011-01-01"}}}));
    let (_, rows) = get(&app, &format!("/quakes?filter={}", filter)).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_requests_are_400() {
    let app = build_test_app();
    let id = create(&app, "/quakes", json!({"name": "x"})).await;

    let (status, body) = post(&app, "/quakes", json!({"mw": 7.0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, _) = post(&app, "/quakes", json!({"name": "y", "mw": "big"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/quakes", json!({"name": "y", "magnitude": 7})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/quakes", json!({"name": "y", "id": "mine"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/quakes?filter=%7Bnope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");

    let unknown = encode(&json!({"where": {"magnitude": 7}}));
    let (status, _) = get(&app, &format!("/quakes?filter={}", unknown)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let bad_key = encode(&json!({"include": ["x"]}));
    let (status, _) = get(&app, &format!("/quakes?filter={}", bad_key)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let too_far = encode(&json!({"limit": 18446744073709551615u64}));
    let (status, _) = get(&app, &format!("/quakes?filter={}", too_far)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let huge = json!({"name": "y", "collectionPos": 18446744073709551615u64});
    let (status, body) = post(&app, "/quakes", huge).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let uri = format!("/quakes/{}", id);
    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({"name": null}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!(["x"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn id_in_body_follows_the_addressed_identity() {
    let app = build_test_app();
    let id = create(&app, "/quakes", json!({"name": "Valdivia", "mw": 9.5})).await;
    let uri = format!("/quakes/{}", id);

    let patch = json!({"id": "other", "mw": 9.4});
    assert_eq!(send(&app, Method::PATCH, &uri, Some(patch)).await.0, StatusCode::NO_CONTENT);
    let full = json!({"id": "other", "name": "Valdivia 1960"});
    assert_eq!(send(&app, Method::PUT, &uri, Some(full)).await.0, StatusCode::NO_CONTENT);
    let (_, stored) = get(&app, &uri).await;
    assert_eq!(stored, json!({"id": id, "name": "Valdivia 1960"}));
    assert_eq!(get(&app, "/quakes/other").await.0, StatusCode::NOT_FOUND);

    let (status, body) = post(&app, "/quakes", json!({"id": "mine", "name": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    let (status, body) = send(&app, Method::PATCH, "/quakes", Some(json!({"id": "all"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn absent_ids_are_404() {
    let app = build_test_app();
    let uri = "/tsunami-runups/0000";
    assert_eq!(get(&app, uri).await.0, StatusCode::NOT_FOUND);
    let patch = json!({"year": 1});
    assert_eq!(send(&app, Method::PATCH, uri, Some(patch)).await.0, StatusCode::NOT_FOUND);
    let full = json!({"infoSource": "NGDC"});
    assert_eq!(send(&app, Method::PUT, uri, Some(full)).await.0, StatusCode::NOT_FOUND);
    let (status, body) = send(&app, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "not found: TsunamiRunup with id \"0000\"");
}

#[tokio::test]
async fn collections_are_independent() {
    let app = build_test_app();
    create(&app, "/quakes", json!({"name": "x"})).await;
    let (_, count) = get(&app, "/tsunami-sources/count").await;
    assert_eq!(count, json!({"count": 0}));
}
