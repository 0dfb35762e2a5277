use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt; // for `oneshot`

/// POST /auth/login with a JSON credential body
pub async fn post_login(app: &Router, email: &str, password: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(format!(
            r#"{{"email": "{}", "password": "{}"}}"#,
            email, password
        )))
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

/// POST /auth/refresh, optionally carrying a refresh-token cookie
pub async fn post_refresh(app: &Router, refresh_token: Option<&str>) -> Response {
    let mut builder = Request::builder().method("POST").uri("/auth/refresh");
    if let Some(token) = refresh_token {
        builder = builder.header(header::COOKIE, format!("refreshToken={}", token));
    }

    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// POST /auth/logout
pub async fn post_logout(app: &Router) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .body(Body::empty())
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

/// GET /auth/verify, optionally carrying an access-token cookie
pub async fn get_verify(app: &Router, access_token: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri("/auth/verify");
    if let Some(token) = access_token {
        builder = builder.header(header::COOKIE, format!("accessToken={}", token));
    }

    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Extracts the value of a named cookie from the response's Set-Cookie headers
pub fn cookie_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .find_map(|cookie| {
            let (cookie_name, rest) = cookie.split_once('=')?;
            if cookie_name == name {
                Some(rest.split(';').next().unwrap_or(rest).to_string())
            } else {
                None
            }
        })
}

/// Deserializes the response body as JSON
pub async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
