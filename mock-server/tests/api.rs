use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, sign, DEFAULT_API_KEY, DEFAULT_SHARED_SECRET};
use tower::ServiceExt;

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn query(params: &[(&str, &str)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={}", v.replace('@', "%40").replace(' ', "+")))
        .collect::<Vec<_>>()
        .join("&")
}

fn get(params: &[(&str, &str)]) -> Request<String> {
    Request::builder()
        .uri(format!("/services/rest/?{}", query(params)))
        .body(String::new())
        .unwrap()
}

fn post(params: &[(&str, &str)]) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/services/rest/")
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(query(params))
        .unwrap()
}

fn signed(params: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut owned: Vec<(String, String)> = params.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    let sig = sign(DEFAULT_SHARED_SECRET, &owned);
    owned.push(("api_sig".to_string(), sig));
    owned
}

fn as_refs(params: &[(String, String)]) -> Vec<(&str, &str)> {
    params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

// --- envelope ---

#[tokio::test]
async fn find_by_email_returns_user() {
    let resp = app()
        .oneshot(get(&[
            ("method", "flickr.people.findByEmail"),
            ("api_key", DEFAULT_API_KEY),
            ("find_email", "bob@example.com"),
        ]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_text(resp).await,
        r#"<rsp stat="ok"><user id="123@N01" nsid="123@N01"><username>bob</username></user></rsp>"#
    );
}

#[tokio::test]
async fn unknown_user_is_a_fail_envelope() {
    let resp = app()
        .oneshot(get(&[
            ("method", "flickr.people.findByEmail"),
            ("api_key", DEFAULT_API_KEY),
            ("find_email", "nobody@example.com"),
        ]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_text(resp).await,
        r#"<rsp stat="fail"><err code="1" msg="User not found"/></rsp>"#
    );
}

#[tokio::test]
async fn invalid_api_key_is_code_100() {
    let resp = app()
        .oneshot(get(&[("method", "flickr.test.echo"), ("api_key", "wrong")]))
        .await
        .unwrap();
    assert!(body_text(resp).await.contains(r#"code="100""#));
}

#[tokio::test]
async fn unknown_method_is_code_112() {
    let resp = app()
        .oneshot(get(&[("method", "flickr.nope"), ("api_key", DEFAULT_API_KEY)]))
        .await
        .unwrap();
    assert!(body_text(resp).await.contains(r#"code="112""#));
}

#[tokio::test]
async fn echo_repeats_parameters_in_order() {
    let resp = app()
        .oneshot(post(&[("method", "flickr.test.echo"), ("api_key", DEFAULT_API_KEY), ("foo", "bar")]))
        .await
        .unwrap();
    assert_eq!(
        body_text(resp).await,
        r#"<rsp stat="ok"><method>flickr.test.echo</method><api_key>test-key</api_key><foo>bar</foo></rsp>"#
    );
}

// --- signing ---

#[tokio::test]
async fn auth_methods_require_signature() {
    let resp = app()
        .oneshot(get(&[("method", "flickr.auth.getFrob"), ("api_key", DEFAULT_API_KEY)]))
        .await
        .unwrap();
    assert!(body_text(resp).await.contains(r#"code="97""#));
}

#[tokio::test]
async fn bad_signature_is_code_96() {
    let resp = app()
        .oneshot(get(&[
            ("method", "flickr.auth.getFrob"),
            ("api_key", DEFAULT_API_KEY),
            ("api_sig", "0123456789abcdef0123456789abcdef"),
        ]))
        .await
        .unwrap();
    assert!(body_text(resp).await.contains(r#"code="96""#));
}

#[tokio::test]
async fn signed_get_frob_returns_frob() {
    let params = signed(&[("method", "flickr.auth.getFrob"), ("api_key", DEFAULT_API_KEY)]);
    let resp = app().oneshot(get(&as_refs(&params))).await.unwrap();
    let body = body_text(resp).await;
    assert!(body.starts_with(r#"<rsp stat="ok"><frob>"#), "{body}");
}

#[tokio::test]
async fn unapproved_frob_is_code_108() {
    let params = signed(&[
        ("method", "flickr.auth.getToken"),
        ("api_key", DEFAULT_API_KEY),
        ("frob", "never-issued"),
    ]);
    let resp = app().oneshot(get(&as_refs(&params))).await.unwrap();
    assert!(body_text(resp).await.contains(r#"code="108""#));
}

// --- permissions ---

#[tokio::test]
async fn pool_add_without_token_is_code_99() {
    let resp = app()
        .oneshot(post(&[
            ("method", "flickr.groups.pools.add"),
            ("api_key", DEFAULT_API_KEY),
            ("photo_id", "2735"),
            ("group_id", "34427469792@N01"),
        ]))
        .await
        .unwrap();
    assert!(body_text(resp).await.contains(r#"code="99""#));
}

// --- fixtures ---

#[tokio::test]
async fn pool_context_marks_missing_neighbour_with_zero() {
    let resp = app()
        .oneshot(get(&[
            ("method", "flickr.groups.pools.getContext"),
            ("api_key", DEFAULT_API_KEY),
            ("photo_id", "2733"),
            ("group_id", "34427469792@N01"),
        ]))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert!(body.contains(r#"<prevphoto id="0"/>"#), "{body}");
    assert!(body.contains(r#"<nextphoto id="2734""#), "{body}");
}

#[tokio::test]
async fn public_photos_are_paged() {
    let resp = app()
        .oneshot(get(&[
            ("method", "flickr.people.getPublicPhotos"),
            ("api_key", DEFAULT_API_KEY),
            ("user_id", "12037949754@N01"),
            ("per_page", "2"),
            ("page", "2"),
        ]))
        .await
        .unwrap();
    let body = body_text(resp).await;
    assert!(body.contains(r#"page="2" pages="2" perpage="2" total="3""#), "{body}");
    assert!(body.contains(r#"id="2735""#));
    assert!(!body.contains(r#"id="2733""#));
}

#[tokio::test]
async fn page_past_the_end_is_an_empty_page() {
    let resp = app()
        .oneshot(get(&[
            ("method", "flickr.groups.pools.getPhotos"),
            ("api_key", DEFAULT_API_KEY),
            ("group_id", "34427469792@N01"),
            ("per_page", "2"),
            ("page", "18446744073709551615"),
        ]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.starts_with(r#"<rsp stat="ok"><photos page="18446744073709551615""#), "{body}");
    assert!(!body.contains("<photo "), "{body}");
}

#[tokio::test]
async fn licenses_are_listed() {
    let resp = app()
        .oneshot(get(&[("method", "flickr.photos.licenses.getInfo"), ("api_key", DEFAULT_API_KEY)]))
        .await
        .unwrap();
    assert_eq!(body_text(resp).await.matches("<license ").count(), 3);
}

// --- authorization page ---

#[tokio::test]
async fn authorize_page_rejects_bad_signature() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri(format!("/services/auth/?api_key={DEFAULT_API_KEY}&perms=read&frob=f&api_sig=bad"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn authorize_page_rejects_unknown_frob() {
    let params = signed(&[("api_key", DEFAULT_API_KEY), ("perms", "read"), ("frob", "f")]);
    let resp = app()
        .oneshot(
            Request::builder()
                .uri(format!("/services/auth/?{}", query(&as_refs(&params))))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
