//! Adapter tests for the reqwest backend client against a loopback server.
//!
//! Each test serves one canned HTTP response and inspects both the decoded
//! result and the raw request the client sent.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::time::Duration;

use crm_console::domain::ports::{
    ApiError, MechanicDirectory, MonitoringFeed, ServiceCatalogue, ServiceRequestBook,
};
use crm_console::domain::{Draft, RecordId, ServiceForm};
use crm_console::outbound::http::BackendApi;
use rstest::rstest;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

struct Canned {
    status: &'static str,
    content_type: &'static str,
    body: &'static str,
}

/// Serve `canned` to the first connection and return the raw request.
async fn serve_once(canned: Canned) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept connection");
        let mut request = Vec::new();
        let mut chunk = [0_u8; 4096];
        loop {
            let read = stream.read(&mut chunk).await.expect("read request");
            request.extend(chunk.iter().take(read));
            if read == 0 || request_complete(&request) {
                break;
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            canned.status,
            canned.content_type,
            canned.body.len(),
            canned.body
        );
        stream
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        stream.shutdown().await.expect("close connection");
        String::from_utf8_lossy(&request).into_owned()
    });
    let base = Url::parse(&format!("http://{addr}/api/")).expect("loopback URL");
    (base, handle)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let expected = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body.len() >= expected
}

fn client(base: Url, token: Option<&str>) -> BackendApi {
    BackendApi::new(base, Duration::from_secs(5))
        .expect("client builds")
        .with_token(token.map(str::to_owned))
}

#[rstest]
#[tokio::test]
async fn enveloped_lists_decode_and_carry_the_bearer_token() {
    let (base, server) = serve_once(Canned {
        status: "200 OK",
        content_type: "application/json",
        body: r#"{"data":[{"id":3,"name":"Juma","email":"juma@garage.test","status":"approved"}]}"#,
    })
    .await;

    let mechanics = client(base, Some("tok-9"))
        .list_mechanics()
        .await
        .expect("list decodes");
    let request = server.await.expect("server task").to_lowercase();

    assert_eq!(mechanics.len(), 1);
    assert_eq!(mechanics.first().map(|m| &m.id), Some(&RecordId::Numeric(3)));
    assert!(request.starts_with("get /api/mechanics http/1.1"), "{request}");
    assert!(request.contains("authorization: bearer tok-9"), "{request}");
}

#[rstest]
#[case("application/json", r#"{"message":"boom"}"#, "boom")]
#[case("application/json; charset=utf-8", r#"{"error":"Forbidden resource"}"#, "Forbidden resource")]
#[case("application/json", r#"{"message":["price must be a number","location should not be empty"]}"#,
       "price must be a number, location should not be empty")]
#[case("text/plain", "", "Request failed with status 500: Internal Server Error")]
#[case("text/html", "upstream exploded", "upstream exploded")]
#[case("application/json", "{not json", "Request failed with status 500: Internal Server Error")]
#[tokio::test]
async fn failed_responses_are_normalised_to_one_message(
    #[case] content_type: &'static str,
    #[case] body: &'static str,
    #[case] expected: &str,
) {
    let (base, server) = serve_once(Canned {
        status: "500 Internal Server Error",
        content_type,
        body,
    })
    .await;

    let err = client(base, None)
        .list_services()
        .await
        .expect_err("server error surfaces");
    let request = server.await.expect("server task").to_lowercase();

    assert_eq!(err, ApiError::status(500_u16, expected));
    assert_eq!(err.to_string(), expected);
    assert!(!request.contains("authorization:"), "{request}");
}

#[rstest]
#[tokio::test]
async fn deletes_succeed_on_any_success_status() {
    let (base, server) = serve_once(Canned {
        status: "204 No Content",
        content_type: "text/plain",
        body: "",
    })
    .await;

    client(base, Some("tok"))
        .delete_service_request(&RecordId::Text("req-7".to_owned()))
        .await
        .expect("delete succeeds");
    let request = server.await.expect("server task");

    assert!(request.starts_with("DELETE /api/service-requests/req-7 "), "{request}");
}

#[rstest]
#[tokio::test]
async fn monitoring_arrays_yield_their_first_snapshot() {
    let (base, server) = serve_once(Canned {
        status: "200 OK",
        content_type: "application/json",
        body: r#"[{"activeUsers":12,"activeMechanics":4,"totalServices":9,"totalFeedbacks":30},{"activeUsers":1}]"#,
    })
    .await;

    let snapshot = client(base, None).snapshot().await.expect("snapshot decodes");
    server.await.expect("server task");

    assert_eq!(snapshot.active_users, Some(12));
    assert_eq!(snapshot.total_feedbacks, Some(30));
}

#[rstest]
#[tokio::test]
async fn service_forms_post_prices_as_strings() {
    let (base, server) = serve_once(Canned {
        status: "201 Created",
        content_type: "application/json",
        body: r#"{"id":"svc-1","name":"Brake bleed","price":"1500.00","duration":45,"isAvailable":true}"#,
    })
    .await;
    let mut form = ServiceForm::default();
    form.apply_all([
        "name=Brake bleed",
        "description=Flush and bleed",
        "price=1500",
        "duration=45",
    ])
    .expect("valid form");

    let created = client(base, Some("tok"))
        .create_service(&form)
        .await
        .expect("service created");
    let request = server.await.expect("server task");

    assert_eq!(created.id, RecordId::Text("svc-1".to_owned()));
    assert!(request.starts_with("POST /api/services "), "{request}");
    assert!(request.contains(r#""price":"1500""#), "{request}");
    assert!(request.contains(r#""isAvailable":true"#), "{request}");
}

#[rstest]
#[tokio::test]
async fn undecodable_success_bodies_are_decode_errors() {
    let (base, server) = serve_once(Canned {
        status: "200 OK",
        content_type: "application/json",
        body: r#"{"unexpected":true}"#,
    })
    .await;

    let err = client(base, None)
        .list_service_requests()
        .await
        .expect_err("shape mismatch");
    server.await.expect("server task");

    assert_eq!(err.kind(), "Decode");
}
