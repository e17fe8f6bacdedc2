use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Echo, Horse};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_horses_empty() {
    let resp = app().oneshot(empty_request("GET", "/horses")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let horses: Vec<Horse> = body_json(resp).await;
    assert!(horses.is_empty());
}

#[tokio::test]
async fn head_horses_has_no_body() {
    let resp = app().oneshot(empty_request("HEAD", "/horses")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_horse_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/horses",
            r#"{"name":"Seabiscuit","breed":"Thoroughbred"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let horse: Horse = body_json(resp).await;
    assert_eq!(horse.name, "Seabiscuit");
    assert_eq!(horse.breed, "Thoroughbred");
}

#[tokio::test]
async fn create_blank_horse_returns_invalid_horse() {
    let resp = app()
        .oneshot(json_request("POST", "/horses", r#"{"name":"  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"code": "INVALID_HORSE"}));
}

#[tokio::test]
async fn create_horse_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/horses", r#"{"not_name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get / update / delete on missing ids ---

#[tokio::test]
async fn get_horse_not_found() {
    let resp = app()
        .oneshot(empty_request(
            "GET",
            "/horses/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn get_horse_bad_uuid_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/horses/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_horse_not_found() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/horses/00000000-0000-0000-0000-000000000000",
            r#"{"name":"Nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_horse_not_found() {
    let resp = app()
        .oneshot(empty_request(
            "DELETE",
            "/horses/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- echo ---

#[tokio::test]
async fn echo_reflects_method_query_headers_and_body() {
    let request = Request::builder()
        .method("PATCH")
        .uri("/echo?a=1&b=2")
        .header("x-myapp-header", "present")
        .body("payload".to_string())
        .unwrap();
    let resp = app().oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let echo: Echo = body_json(resp).await;
    assert_eq!(echo.method, "PATCH");
    assert_eq!(echo.query.as_deref(), Some("a=1&b=2"));
    assert_eq!(echo.headers["x-myapp-header"], "present");
    assert_eq!(echo.body, "payload");
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two horses
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/horses",
            r#"{"name":"Pie","breed":"Pony"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let pie: Horse = body_json(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/horses",
            r#"{"name":"Black Beauty","breed":"Arabian"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // list filtered by breed
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/horses?breed=Pony"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let horses: Vec<Horse> = body_json(resp).await;
    assert_eq!(horses, vec![pie.clone()]);

    // list with limit, sorted by name
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/horses?limit=1"))
        .await
        .unwrap();
    let horses: Vec<Horse> = body_json(resp).await;
    assert_eq!(horses.len(), 1);
    assert_eq!(horses[0].name, "Black Beauty");

    // partial update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/horses/{}", pie.id),
            r#"{"breed":"Shetland"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Horse = body_json(resp).await;
    assert_eq!(updated.name, "Pie"); // unchanged
    assert_eq!(updated.breed, "Shetland");

    // blank rename is rejected
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/horses/{}", pie.id),
            r#"{"name":""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/horses/{}", pie.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete is a 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/horses/{}", pie.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
