//! [`HttpBackend`] against a tiny hand-written HTTP server.

use futures::StreamExt;
use lsv_client::{HttpBackend, LogBackend, SseEvent};
use lsv_core::RequestError;
use reqwest::StatusCode;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    sync::oneshot,
};

/// Serves a single connection with a canned response,
/// handing back the raw request it received.
async fn serve_once(response: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        _ = tx.send(request);
    });
    (base, rx)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .find_map(|n| {
                    let (name, value) = n.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8(buf).unwrap()
}

fn response(status: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

#[tokio::test]
async fn streams_events_over_http() {
    let body = ": keep-alive\n\ndata: first\n\ndata: multi\ndata: line\n\nevent: ping\ndata: x\n\n";
    let (base, request) = serve_once(response("200 OK", "text/event-stream", body)).await;
    let backend = HttpBackend::new(&base).unwrap();

    let events: Vec<_> = backend
        .open_stream()
        .await
        .unwrap()
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(
        events,
        [
            SseEvent::message("first"),
            SseEvent::message("multi\nline"),
            SseEvent {
                event: "ping".to_owned(),
                data: "x".to_owned(),
                id: None,
            },
        ]
    );
    let request = request.await.unwrap();
    assert!(request.starts_with("GET /stream_logs HTTP/1.1\r\n"));
    assert!(request.to_ascii_lowercase().contains("accept: text/event-stream"));
}

#[tokio::test]
async fn clear_reports_the_server_status() {
    let (base, request) =
        serve_once(response("500 Internal Server Error", "text/plain", "nope")).await;
    let backend = HttpBackend::new(&base).unwrap();

    let status = backend.clear_logs().await.unwrap();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(request.await.unwrap().starts_with("GET /clear_logs HTTP/1.1\r\n"));
}

#[tokio::test]
async fn run_posts_an_encoded_form() {
    let (base, request) = serve_once(response("404 Not Found", "text/plain", "")).await;
    let backend = HttpBackend::new(&base).unwrap();

    let response = backend.run_script("my job.sh").await.unwrap();
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let request = request.await.unwrap();
    assert!(request.starts_with("POST /run_script HTTP/1.1\r\n"));
    assert!(
        request
            .to_ascii_lowercase()
            .contains("content-type: application/x-www-form-urlencoded")
    );
    assert!(request.ends_with("\r\n\r\nscript_name=my%20job.sh"));
}

#[tokio::test]
async fn event_stream_content_type_is_case_insensitive() {
    let (base, _request) = serve_once(response(
        "200 OK",
        "Text/Event-Stream; charset=UTF-8",
        "data: hi\n\n",
    ))
    .await;
    let backend = HttpBackend::new(&base).unwrap();

    let events: Vec<_> = backend
        .open_stream()
        .await
        .unwrap()
        .map(Result::unwrap)
        .collect()
        .await;
    assert_eq!(events, [SseEvent::message("hi")]);
}

#[tokio::test]
async fn rejects_streams_that_arent_event_streams() {
    let (base, _request) = serve_once(response("200 OK", "text/html", "<html></html>")).await;
    let backend = HttpBackend::new(&base).unwrap();

    let result = backend.open_stream().await;
    assert!(matches!(
        result,
        Err(RequestError::NotAnEventStream { ref content_type, .. }) if content_type == "text/html"
    ));
}

#[tokio::test]
async fn refused_connections_are_transport_errors() {
    // Grab a free port, then close it again.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let backend = HttpBackend::new(&base).unwrap();
    let Err(error) = backend.clear_logs().await else {
        panic!("nothing should be listening on {base}");
    };
    assert!(matches!(error, RequestError::Reqwest(_)), "{error:?}");
}
