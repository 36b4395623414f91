//! Integration tests for the HTTP client against a minimal in-process HTTP
//! server (no mocks): request shape, success, and each failure kind.

use docs_gpt_client::{AnswerBackend, Client, ClientError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// What the server saw: request line and body.
#[derive(Debug)]
struct Received {
    request_line: String,
    headers: String,
    body: String,
}

async fn read_request(stream: &mut TcpStream) -> Received {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending a full request");
        buf.extend_from_slice(&chunk[..n]);
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_string();
        let length = head
            .lines()
            .filter_map(|l| l.split_once(':'))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + length {
            let body = String::from_utf8_lossy(&buf[end + 4..end + 4 + length]).to_string();
            let (request_line, headers) = head.split_once("\r\n").unwrap_or((head.as_str(), ""));
            return Received {
                request_line: request_line.to_string(),
                headers: headers.to_lowercase(),
                body,
            };
        }
    }
}

/// Serve `responses` in order, one per connection. Each request is reported
/// on the returned channel.
async fn spawn_http_server(responses: Vec<(u16, String)>) -> (u16, mpsc::UnboundedReceiver<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut tcp, _) = listener.accept().await.unwrap();
            let received = read_request(&mut tcp).await;
            let _ = tx.send(received);
            let response = format!(
                "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            tcp.write_all(response.as_bytes()).await.unwrap();
            let _ = tcp.shutdown().await;
        }
    });
    (port, rx)
}

const ANSWER: &str = r#"{"question":"How do I sign a request?","answer":"Use an HMAC.","url":"https://docs.example.com/auth"}"#;

#[tokio::test]
async fn posts_text_and_decodes_answer() {
    let (port, mut seen) = spawn_http_server(vec![(200, ANSWER.into())]).await;
    let client = Client::new(&format!("http://127.0.0.1:{}/predict", port)).unwrap();

    let payload = client
        .ask("How do I sign a request?")
        .await
        .expect("ask should succeed");
    assert_eq!(payload.question, "How do I sign a request?");
    assert_eq!(payload.answer, "Use an HMAC.");
    assert_eq!(payload.url, "https://docs.example.com/auth");

    let request = seen.recv().await.unwrap();
    assert_eq!(request.request_line, "POST /predict HTTP/1.1");
    assert!(request.headers.contains("content-type: application/json"));
    assert!(!request.headers.contains("authorization"));
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body, serde_json::json!({ "text": "How do I sign a request?" }));
}

#[tokio::test]
async fn text_is_sent_verbatim() {
    let (port, mut seen) = spawn_http_server(vec![(200, ANSWER.into())]).await;
    let client = Client::new(&format!("http://127.0.0.1:{}/predict", port)).unwrap();

    let typed = "  spaces, \"quotes\" and ünïcode  ";
    client
        .predict(typed.to_string())
        .await
        .expect("predict should succeed");

    let request = seen.recv().await.unwrap();
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["text"], typed);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (port, _seen) =
        spawn_http_server(vec![(500, r#"{"detail":"boom"}"#.into())]).await;
    let client = Client::new(&format!("http://127.0.0.1:{}/predict", port)).unwrap();

    let err = client.ask("q").await.expect_err("500 should fail");
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_field_is_a_decode_error() {
    let (port, _seen) =
        spawn_http_server(vec![(200, r#"{"question":"q","answer":"a"}"#.into())]).await;
    let client = Client::new(&format!("http://127.0.0.1:{}/predict", port)).unwrap();

    let err = client.ask("q").await.expect_err("missing url should fail");
    assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn extra_field_is_a_decode_error() {
    let body = r#"{"question":"q","answer":"a","url":"http://x","score":0.9}"#;
    let (port, _seen) = spawn_http_server(vec![(200, body.into())]).await;
    let client = Client::new(&format!("http://127.0.0.1:{}/predict", port)).unwrap();

    let err = client.ask("q").await.expect_err("extra field should fail");
    assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
    let (port, _seen) = spawn_http_server(vec![(200, "<html>oops</html>".into())]).await;
    let client = Client::new(&format!("http://127.0.0.1:{}/predict", port)).unwrap();

    let err = client.ask("q").await.expect_err("html should fail");
    assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = Client::new(&format!("http://127.0.0.1:{}/predict", port)).unwrap();
    let err = client.ask("q").await.expect_err("nothing is listening");
    assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn health_probes_the_origin_root() {
    let (port, mut seen) = spawn_http_server(vec![(
        200,
        r#"{"health_check":"OK","model_version":"0.0.1"}"#.into(),
    )])
    .await;
    let client = Client::new(&format!("http://127.0.0.1:{}/predict?x=1", port)).unwrap();

    let status = client.health().await.expect("health should succeed");
    assert!(status.is_ok());
    assert_eq!(status.model_version, "0.0.1");

    let request = seen.recv().await.unwrap();
    assert_eq!(request.request_line, "GET / HTTP/1.1");
}

#[test]
fn rejects_invalid_endpoints() {
    assert!(matches!(
        Client::new("not a url"),
        Err(ClientError::InvalidEndpoint { .. })
    ));
    assert!(matches!(
        Client::new("ftp://example.com/predict"),
        Err(ClientError::InvalidEndpoint { .. })
    ));
}
