use std::io::Cursor;

use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

/// Mobile and browser clients call the API cross-origin; every response is
/// open to any origin.
fn cors_headers() -> Vec<Header> {
    [
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "*"),
        ("Access-Control-Allow-Credentials", "true"),
    ]
    .iter()
    .filter_map(|(name, value)| header(name, value))
    .collect()
}

fn bytes_response(status: u16, content_type: &str, body: Vec<u8>) -> HttpResponse {
    let len = body.len();
    let mut headers = cors_headers();
    headers.extend(header("Content-Type", content_type));
    Response::new(StatusCode(status), headers, Cursor::new(body), Some(len), None)
}

pub fn json_response<T: Serialize>(status: u16, body: &T) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(bytes) => bytes_response(status, "application/json", bytes),
        Err(e) => {
            log::error!("Could not serialize response: {}", e);
            bytes_response(500, "application/json", br#"{"detail":"Internal Server Error"}"#.to_vec())
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

pub fn error_response(status: u16, detail: &str) -> HttpResponse {
    json_response(status, &ErrorBody { detail })
}

pub fn preflight() -> HttpResponse {
    Response::new(StatusCode(204), cors_headers(), Cursor::new(Vec::new()), Some(0), None)
}

pub fn not_found() -> HttpResponse {
    error_response(404, "Not Found")
}

pub fn method_not_allowed(allow: &str) -> HttpResponse {
    let mut response = error_response(405, "Method Not Allowed");
    if let Some(h) = header("Allow", allow) {
        response.add_header(h);
    }
    response
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Strips the query string from a request URL.
fn route_path(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

#[derive(Debug, PartialEq, Eq)]
enum Route {
    Preflight,
    Root,
    Health,
    Predict,
    /// Known path, wrong method; carries the `Allow` value.
    MethodNotAllowed(&'static str),
    NotFound,
}

fn resolve(method: &Method, path: &str) -> Route {
    match (method, path) {
        (Method::Options, _) => Route::Preflight,

        (Method::Get,  "/")                      => Route::Root,
        (Method::Get,  "/health")                => Route::Health,
        (Method::Post, "/predict/" | "/predict") => Route::Predict,

        (_, "/" | "/health")                     => Route::MethodNotAllowed("GET"),
        (_, "/predict/" | "/predict")            => Route::MethodNotAllowed("POST"),

        _ => Route::NotFound,
    }
}

/// Dispatches one request and writes the response.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    log::debug!("{} {}", method, url);

    let response = match resolve(&method, route_path(&url)) {
        Route::Preflight               => preflight(),
        Route::Root                    => handlers::root::handle_root(),
        Route::Health                  => handlers::root::handle_health(),
        Route::Predict                 => handlers::predict::handle(&mut request, &state),
        Route::MethodNotAllowed(allow) => method_not_allowed(allow),
        Route::NotFound                => not_found(),
    };

    if let Err(e) = request.respond(response) {
        log::warn!("Failed to write response for {} {}: {}", method, url, e);
    }
}
