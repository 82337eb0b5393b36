use std::sync::{Arc, Mutex};

use deposit_console::http::Method;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: String,
}

type Handler = dyn Fn(&RecordedRequest) -> (u16, String) + Send + Sync;

/// How the fake frames its response bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Framing {
    ContentLength,
    Chunked,
}

/// In-process stand-in for the deposit REST API.
pub struct FakeApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl FakeApi {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    {
        Self::start_with(Framing::ContentLength, handler).await
    }

    pub async fn start_with<F>(framing: Framing, handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind fake api");
        let addr = listener.local_addr().expect("no local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Arc<Handler> = Arc::new(handler);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    conn = listener.accept() => {
                        let Ok((stream, _)) = conn else { break };
                        let handler = Arc::clone(&handler);
                        let recorded = Arc::clone(&recorded);
                        tokio::spawn(async move {
                            if let Err(e) = serve(stream, framing, handler, recorded).await {
                                eprintln!("fake api connection error: {}", e);
                            }
                        });
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
        });

        FakeApi {
            base_url: format!("http://{}", addr),
            requests,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn serve(
    mut stream: TcpStream,
    framing: Framing,
    handler: Arc<Handler>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
) -> anyhow::Result<()> {
    let request = read_request(&mut stream).await?;
    recorded.lock().unwrap().push(request.clone());

    let (status, body) = handler(&request);
    let head = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\nconnection: close\r\n",
        status,
        reason(status)
    );
    let response = match framing {
        Framing::ContentLength => {
            format!("{head}content-length: {}\r\n\r\n{body}", body.len())
        }
        Framing::Chunked => format!("{head}transfer-encoding: chunked\r\n\r\n{}", chunk(&body)),
    };
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

async fn read_request(stream: &mut TcpStream) -> anyhow::Result<RecordedRequest> {
    let mut raw = Vec::new();
    let mut buffer = [0u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut buffer).await?;
        if n == 0 {
            anyhow::bail!("connection closed before headers");
        }
        raw.extend_from_slice(&buffer[..n]);
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while raw.len() < header_end + content_length {
        let n = stream.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buffer[..n]);
    }

    let mut first = head.lines().next().unwrap_or_default().split_whitespace();
    let method = Method::try_from(first.next().unwrap_or_default())?;
    let path = first.next().unwrap_or_default().to_string();
    let body = String::from_utf8_lossy(&raw[header_end..]).to_string();
    Ok(RecordedRequest { method, path, body })
}

// Splits the body in two chunks so clients must reassemble it.
fn chunk(body: &str) -> String {
    let split = (0..=body.len() / 2)
        .rev()
        .find(|i| body.is_char_boundary(*i))
        .unwrap_or(0);
    let mut out = String::new();
    for part in [&body[..split], &body[split..]] {
        if !part.is_empty() {
            out.push_str(&format!("{:x}\r\n{}\r\n", part.len(), part));
        }
    }
    out.push_str("0\r\n\r\n");
    out
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        _ => "Internal Server Error",
    }
}
