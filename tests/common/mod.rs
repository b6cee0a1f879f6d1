//! Shared test helpers: a one-shot HTTP stub server and binary runner.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::process::{Command, Output};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const ACCEPT_TIMEOUT: Duration = Duration::from_secs(10);

/// A request as seen on the wire by [`StubServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names lower-cased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Serves exactly one canned response on 127.0.0.1 and records the request.
pub struct StubServer {
    pub url: String,
    handle: JoinHandle<Option<RecordedRequest>>,
}

impl StubServer {
    pub fn json(status: u16, reason: &str, body: &str) -> Self {
        Self::respond(status, reason, "application/json", body)
    }

    pub fn text(status: u16, reason: &str, body: &str) -> Self {
        Self::respond(status, reason, "text/plain", body)
    }

    pub fn respond(status: u16, reason: &str, content_type: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let addr = listener.local_addr().expect("local addr");
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = thread::spawn(move || {
            let mut stream = accept_within(&listener, ACCEPT_TIMEOUT)?;
            stream.set_nonblocking(false).expect("blocking stream");
            let request = read_request(&mut stream);
            stream
                .write_all(response.as_bytes())
                .expect("write stub response");
            stream.flush().ok();
            Some(request)
        });

        Self {
            url: format!("http://{addr}"),
            handle,
        }
    }

    /// The recorded request, or `None` if nobody connected.
    pub fn request(self) -> Option<RecordedRequest> {
        self.handle.join().expect("stub server thread")
    }
}

/// A bound port that must never receive a connection.
pub struct SilentListener {
    pub url: String,
    listener: TcpListener,
}

impl SilentListener {
    pub fn new() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));
        Self { url, listener }
    }

    pub fn was_contacted(&self) -> bool {
        match self.listener.accept() {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::WouldBlock => false,
            Err(e) => panic!("accept failed: {e}"),
        }
    }
}

fn accept_within(listener: &TcpListener, timeout: Duration) -> Option<TcpStream> {
    let deadline = Instant::now() + timeout;
    loop {
        match listener.accept() {
            Ok((stream, _)) => return Some(stream),
            Err(e) if e.kind() == ErrorKind::WouldBlock => {
                if Instant::now() >= deadline {
                    return None;
                }
                thread::sleep(Duration::from_millis(10));
            }
            Err(e) => panic!("accept failed: {e}"),
        }
    }
}

fn read_request(stream: &mut TcpStream) -> RecordedRequest {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

    let mut request_line = String::new();
    reader.read_line(&mut request_line).expect("request line");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).expect("request body");

    RecordedRequest {
        method,
        path,
        headers,
        body: String::from_utf8(body).expect("utf-8 body"),
    }
}

/// Run the binary with a clean, isolated environment.
///
/// `config_home` becomes `XDG_CONFIG_HOME` so no user config is picked up.
pub fn run_cli(config_home: &Path, env: &[(&str, &str)], args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_n8nctl"));
    cmd.args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env("NO_COLOR", "1")
        .env_remove("N8N_API_KEY")
        .env_remove("N8N_BASE_URL")
        .env_remove("N8N_API_PREFIX")
        .env_remove("N8NCTL_CONFIG")
        .env_remove("RUST_LOG");
    for proxy in [
        "HTTP_PROXY",
        "http_proxy",
        "HTTPS_PROXY",
        "https_proxy",
        "ALL_PROXY",
        "all_proxy",
    ] {
        cmd.env_remove(proxy);
    }
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("run n8nctl binary")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
