#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use job_finder_lib::Settings;

/// Settings pointing both providers at `server`, with a credential set.
pub fn settings_for(server: &MockServer) -> Settings {
    Settings {
        jsearch_url: format!("{}/search", server.base_url),
        salary_base_url: format!("{}/salary", server.base_url),
        request_timeout_secs: 5,
        ..Settings::default()
    }
    .with_key("secret")
}

/// Minimal HTTP/1.1 responder on 127.0.0.1 that records every request.
pub struct MockServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    /// `route` maps the request target (path + query) to `(status, body)`.
    pub fn start<F>(route: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let hits_srv = hits.clone();
        let requests_srv = requests.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let request = read_head(&mut stream);
                hits_srv.fetch_add(1, Ordering::SeqCst);

                let target = request
                    .lines()
                    .next()
                    .and_then(|l| l.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                requests_srv.lock().unwrap().push(request);

                let (status, body) = route(&target);
                let resp = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes());
                let _ = stream.flush();
            }
        });

        MockServer { base_url, hits, requests }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits_on(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.lines().next().is_some_and(|l| l.contains(prefix)))
            .count()
    }
}

fn read_head(stream: &mut std::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
