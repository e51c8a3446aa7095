#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::{Json, PlainText}, ApiResponse };
use anyhow::Result;
use log::error;

use crate::utils::errors::HttpResult;
use crate::utils::greet_utils::{self, RequestDebug};

// The static prefix of every greeting.  The host name is appended per request.
const GREETING_PREFIX: &str = "Hello Docker World, host name is ";

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct GreetingApi;

struct ReqGreeting {}

// Implement the debug record trait for logging.
impl RequestDebug for ReqGreeting {
    type Req = ReqGreeting;
    fn get_request_info(&self) -> String {
        "  Request body: (none)".to_string()
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
enum GreetResponse {
    #[oai(status = 200)]
    Http200(PlainText<String>),
    #[oai(status = 500)]
    Http500(Json<HttpResult>),
}

fn make_http_200(greeting: String) -> GreetResponse {
    GreetResponse::Http200(PlainText(greeting))
}
fn make_http_500(msg: String) -> GreetResponse {
    GreetResponse::Http500(Json(HttpResult::new(500.to_string(), msg)))
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl GreetingApi {
    #[oai(path = "/", method = "get")]
    async fn get_greeting(&self, http_req: &Request) -> GreetResponse {
        // No inputs are consumed; log the raw request when debugging.
        let req = ReqGreeting {};
        greet_utils::debug_request(http_req, &req);

        // Process the request.
        greeting_response(greet_utils::get_local_host_name())
    }
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// greeting_response:
// ---------------------------------------------------------------------------
/** Assemble the response from the outcome of the host-name lookup.  On
 * success the body is the static prefix followed by the host name.  When
 * the host cannot resolve its own name there is no fallback greeting and
 * the caller receives a server error.
 */
fn greeting_response(host_name: Result<String>) -> GreetResponse {
    match host_name {
        Ok(name) => make_http_200(GREETING_PREFIX.to_owned() + &name),
        Err(e) => {
            let msg = format!("ERROR: {}", e);
            error!("{}", msg);
            make_http_500(msg)
        },
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use poem::{http::StatusCode, test::TestClient, Route};
    use poem_openapi::{payload::{Json, PlainText}, OpenApiService};

    use super::{greeting_response, GreetingApi, GreetResponse, GREETING_PREFIX};
    use crate::utils::errors::Errors;
    use crate::utils::greet_utils::get_local_host_name;

    // Stand up the same route layout main uses, minus the listener.
    fn test_route() -> Route {
        let api_service =
            OpenApiService::new(GreetingApi, "Greeting Server", "0.1.0");
        Route::new().nest("/", api_service)
    }

    #[tokio::test]
    async fn greeting_returns_host_name() {
        let cli = TestClient::new(test_route());
        let resp = cli.get("/").send().await;
        resp.assert_status_is_ok();

        let expected =
            format!("{}{}", GREETING_PREFIX, get_local_host_name().unwrap());
        resp.assert_text(expected).await;
    }

    #[tokio::test]
    async fn greeting_is_idempotent() {
        let expected =
            format!("{}{}", GREETING_PREFIX, get_local_host_name().unwrap());
        let cli = TestClient::new(test_route());
        cli.get("/").send().await.assert_text(expected.clone()).await;
        cli.get("/").send().await.assert_text(expected).await;
    }

    #[tokio::test]
    async fn unknown_path_returns_404() {
        let cli = TestClient::new(test_route());
        let resp = cli.get("/missing").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
    }

    #[test]
    fn greeting_body_for_known_host() {
        let resp = greeting_response(Ok("worker-1".to_string()));
        match resp {
            GreetResponse::Http200(PlainText(body)) =>
                assert_eq!(body, "Hello Docker World, host name is worker-1"),
            other => panic!("expected HTTP 200, got {:?}", other),
        }
    }

    #[test]
    fn resolution_failure_returns_500() {
        let lookup = Err(anyhow!(Errors::HostnameResolution(
            "lookup failed".to_string())));
        match greeting_response(lookup) {
            GreetResponse::Http500(Json(result)) => {
                assert_eq!(result.result_code, "500");
                assert!(!result.result_msg.starts_with(GREETING_PREFIX));
            },
            other => panic!("expected HTTP 500, got {:?}", other),
        }
    }
}
