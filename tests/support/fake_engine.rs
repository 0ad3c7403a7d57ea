// ABOUTME: Minimal HTTP/1.1 engine stand-in on a local TCP port.
// ABOUTME: Records requests and replays scripted chunked progress streams.

use dockwire::connector::Endpoint;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A request as the engine saw it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// One step of a streamed response body.
#[derive(Debug, Clone)]
pub enum Chunk {
    /// Send as one HTTP chunk.
    Data(String),
    Pause(Duration),
    /// Stop sending and wait for the client to hang up.
    Hang,
    /// Close the socket without finishing the body.
    Abort,
}

#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with a chunked body.
    Stream(Vec<Chunk>),
    /// Fixed status and JSON body.
    Status { code: u16, body: String },
}

/// Newline-delimited events, one chunk each.
pub fn events(lines: &[&str]) -> Reply {
    Reply::Stream(
        lines
            .iter()
            .map(|line| Chunk::Data(format!("{}\r\n", line)))
            .collect(),
    )
}

pub struct FakeEngine {
    port: u16,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    hangups: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl FakeEngine {
    /// Serve `reply` to every connection.
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let hangups = Arc::new(AtomicUsize::new(0));

        let task = {
            let requests = requests.clone();
            let hangups = hangups.clone();
            tokio::spawn(async move {
                while let Ok((socket, _)) = listener.accept().await {
                    tokio::spawn(serve(
                        socket,
                        reply.clone(),
                        requests.clone(),
                        hangups.clone(),
                    ));
                }
            })
        };

        Self {
            port,
            requests,
            hangups,
            task,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::Tcp {
            host: "127.0.0.1".to_string(),
            port: self.port,
        }
    }

    pub fn url(&self) -> String {
        format!("tcp://127.0.0.1:{}", self.port)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Wait until `count` clients have closed a hanging stream.
    pub async fn wait_for_hangups(&self, count: usize, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while tokio::time::Instant::now() < deadline {
            if self.hangups.load(Ordering::SeqCst) >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(
    mut socket: TcpStream,
    reply: Reply,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    hangups: Arc<AtomicUsize>,
) {
    let Some(request) = read_request(&mut socket).await else {
        return;
    };
    requests.lock().unwrap().push(request);

    match reply {
        Reply::Status { code, body } => {
            let response = format!(
                "HTTP/1.1 {} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                code,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
        Reply::Stream(chunks) => {
            let head = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n";
            if socket.write_all(head.as_bytes()).await.is_err() {
                return;
            }
            for chunk in chunks {
                match chunk {
                    Chunk::Data(data) => {
                        let framed = format!("{:x}\r\n{}\r\n", data.len(), data);
                        if socket.write_all(framed.as_bytes()).await.is_err() {
                            return;
                        }
                        let _ = socket.flush().await;
                    }
                    Chunk::Pause(duration) => tokio::time::sleep(duration).await,
                    Chunk::Hang => {
                        let mut buf = [0u8; 64];
                        loop {
                            match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => break,
                                Ok(_) => {}
                            }
                        }
                        hangups.fetch_add(1, Ordering::SeqCst);
                        return;
                    }
                    Chunk::Abort => return,
                }
            }
            let _ = socket.write_all(b"0\r\n\r\n").await;
        }
    }
}

async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[head_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(CapturedRequest {
        method,
        target,
        headers,
        body,
    })
}
