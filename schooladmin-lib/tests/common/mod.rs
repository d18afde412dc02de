//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use schooladmin_lib::api::ListRequest;
use schooladmin_lib::api::ListResult;
use schooladmin_lib::error::ApiError;
use schooladmin_lib::error::Error;
use schooladmin_lib::model::ClassRef;
use schooladmin_lib::page::ClassSource;
use schooladmin_lib::page::ListPage;
use schooladmin_lib::page::ListRecord;
use schooladmin_lib::page::RecordSource;
use schooladmin_lib::page::Update;

// =============================================================================
// Record fixtures
// =============================================================================

/// A scripted response: wait `delay`, then return `result`.
pub struct Scripted<R> {
    pub delay: Duration,
    pub result: Result<(Vec<R>, u64), Error>,
}

/// A record source that replays scripted responses in order and records
/// every request it receives. Once the script runs out it returns empty pages.
pub struct FixtureSource<R> {
    script: Mutex<VecDeque<Scripted<R>>>,
    requests: Mutex<Vec<ListRequest>>,
}

impl<R: ListRecord> FixtureSource<R> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Queues a successful page.
    pub fn respond(&self, records: Vec<R>, total: u64) -> &Self {
        self.respond_after(Duration::ZERO, records, total)
    }

    /// Queues a successful page that arrives after `delay`.
    pub fn respond_after(&self, delay: Duration, records: Vec<R>, total: u64) -> &Self {
        self.script.lock().unwrap().push_back(Scripted {
            delay,
            result: Ok((records, total)),
        });
        self
    }

    /// Queues a failure.
    pub fn fail(&self, error: Error) -> &Self {
        self.script.lock().unwrap().push_back(Scripted {
            delay: Duration::ZERO,
            result: Err(error),
        });
        self
    }

    pub fn requests(&self) -> Vec<ListRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl<R: ListRecord> RecordSource<R> for FixtureSource<R> {
    async fn fetch_page(&self, request: &ListRequest) -> Result<ListResult<R>, Error> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front();
        let Some(Scripted { delay, result }) = next else {
            return Ok(ListResult::new(Vec::new(), request.page, 0, request.limit));
        };
        tokio::time::sleep(delay).await;
        let (records, total) = result?;
        Ok(ListResult::new(records, request.page, total, request.limit))
    }
}

/// Class source returning a fixed result.
pub struct FixtureClasses {
    classes: Option<Vec<ClassRef>>,
}

impl FixtureClasses {
    pub fn ok(classes: Vec<ClassRef>) -> Arc<Self> {
        Arc::new(Self { classes: Some(classes) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { classes: None })
    }
}

#[async_trait]
impl ClassSource for FixtureClasses {
    async fn fetch_classes(&self) -> Result<Vec<ClassRef>, Error> {
        self.classes
            .clone()
            .ok_or_else(|| Error::from(ApiError::http(500, "down")))
    }
}

/// Waits for the next update that is not about the class list.
pub async fn next_list_update<R: ListRecord>(page: &mut ListPage<R>) -> Update {
    loop {
        match page.next_update().await {
            Update::ClassesLoaded => continue,
            other => return other,
        }
    }
}

// =============================================================================
// HTTP backend
// =============================================================================

/// A canned response for one path.
#[derive(Clone)]
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn json(path: &'static str, body: serde_json::Value) -> Self {
        Self {
            path,
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(path: &'static str, status: u16, body: &str) -> Self {
        Self {
            path,
            status,
            body: body.to_string(),
        }
    }
}

/// A throwaway HTTP/1 server on `127.0.0.1:0` serving canned routes.
pub struct Backend {
    pub url: String,
    seen: Arc<Mutex<Vec<String>>>,
}

impl Backend {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes = Arc::new(routes);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let server_seen = seen.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = routes.clone();
                let seen = server_seen.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let routes = routes.clone();
                        let seen = seen.clone();
                        async move {
                            seen.lock().unwrap().push(req.uri().to_string());
                            let (status, body) = routes
                                .iter()
                                .find(|r| r.path == req.uri().path())
                                .map(|r| (r.status, r.body.clone()))
                                .unwrap_or((404, String::new()));
                            Ok::<_, Infallible>(
                                Response::builder()
                                    .status(status)
                                    .header("Content-Type", "application/json")
                                    .body(Full::new(Bytes::from(body)))
                                    .unwrap(),
                            )
                        }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            url: format!("http://{}", addr),
            seen,
        }
    }

    /// Request URIs (path and query) received so far.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}
