use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use confpush_common::network::endpoint::Endpoint;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

/// What one console saw from one session.
#[derive(Debug, Clone)]
pub struct Capture {
    pub accepted_at: Instant,
    pub bytes: Vec<u8>,
}

impl Capture {
    /// Non-empty lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.bytes)
            .split("\r\n")
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A set of listening consoles on 127.0.0.1, one per name.
pub struct FakeLab {
    ports: HashMap<String, u16>,
    captures: Arc<Mutex<HashMap<String, Capture>>>,
}

impl FakeLab {
    pub async fn start(names: &[&str]) -> anyhow::Result<Self> {
        let captures: Arc<Mutex<HashMap<String, Capture>>> = Arc::default();
        let mut ports = HashMap::new();

        for name in names {
            let listener = TcpListener::bind("127.0.0.1:0").await?;
            ports.insert(name.to_string(), listener.local_addr()?.port());

            let name = name.to_string();
            let captures = Arc::clone(&captures);
            tokio::spawn(async move {
                let Ok((mut stream, _peer)) = listener.accept().await else {
                    return;
                };
                let accepted_at = Instant::now();
                let mut bytes = Vec::new();
                let _ = stream.read_to_end(&mut bytes).await;
                captures
                    .lock()
                    .unwrap()
                    .insert(name, Capture { accepted_at, bytes });
            });
        }

        Ok(Self { ports, captures })
    }

    pub fn endpoint(&self, name: &str) -> Endpoint {
        Endpoint::new("127.0.0.1", self.ports[name])
    }

    /// What `name` received, if a session to it has already closed.
    pub fn try_capture(&self, name: &str) -> Option<Capture> {
        self.captures.lock().unwrap().get(name).cloned()
    }

    /// Waits until `name` closed its session, then returns what it received.
    pub async fn capture(&self, name: &str) -> Capture {
        loop {
            if let Some(capture) = self.try_capture(name) {
                return capture;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    }
}

/// An endpoint where nothing listens.
pub async fn closed_endpoint() -> anyhow::Result<Endpoint> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(Endpoint::new("127.0.0.1", port))
}
