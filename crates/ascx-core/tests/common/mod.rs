// Rust guideline compliant 2026-10-12

//! Shared test helpers: a scripted in-memory transport.

#![allow(dead_code)]

use ascx_core::{Client, Error, RequestContext, Result, Transport};
use std::sync::{Arc, Mutex};
use url::Url;

/// Canned reply for a route.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(String),
    NotFound,
    Status(u16),
    Fail(String),
}

/// Transport answering from a route table and recording every request.
///
/// A route key starting with `http` must equal the full URL; any other key is
/// compared with the URL path.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<(String, Reply)>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, key: &str, reply: Reply) {
        self.routes.lock().unwrap().push((key.to_string(), reply));
    }

    pub fn on_json(&self, key: &str, body: &str) {
        self.on(key, Reply::Json(body.to_string()));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, ctx: &RequestContext, url: &Url) -> Result<Vec<u8>> {
        ctx.check()?;
        self.requests.lock().unwrap().push(url.to_string());

        let routes = self.routes.lock().unwrap();
        let reply = routes.iter().find_map(|(key, reply)| {
            let matches = if key.starts_with("http") {
                key == url.as_str()
            } else {
                key == url.path()
            };
            matches.then(|| reply.clone())
        });

        match reply {
            Some(Reply::Json(body)) => Ok(body.into_bytes()),
            Some(Reply::NotFound) => Err(Error::NotFound(url.path().to_string())),
            Some(Reply::Status(status)) => Err(Error::Status {
                status,
                message: "scripted failure".to_string(),
            }),
            Some(Reply::Fail(message)) => Err(Error::Transport(message)),
            None => Err(Error::Transport(format!("unexpected request {}", url))),
        }
    }
}

pub fn client(transport: &Arc<ScriptedTransport>) -> Client {
    Client::new(transport.clone(), ascx_core::APP_STORE_CONNECT_BASE_URL).unwrap()
}
