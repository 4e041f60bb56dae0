use axum::Router;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use hyper::Request;
use hyper::body::Incoming;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server;
use log::{error, trace};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_service::Service;

/// A request as the mock server received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

struct Fixture {
    method: String,
    path: String,
    status: u16,
    body: String,
    delay: Option<Duration>,
}

#[derive(Default)]
struct MockState {
    fixtures: Vec<Fixture>,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<MockState>>;

/// Fake CheddarGetter XML API. Answers registered paths with canned XML and remembers every request.
#[derive(Clone)]
pub struct MockServer {
    address: SocketAddr,
    state: SharedState,
}

impl MockServer {
    /// Starts on a free local port.
    pub fn start() -> Self {
        Self::bind("127.0.0.1:0")
    }

    /// Starts on `address`, on a thread with its own runtime so blocking clients can use it too.
    pub fn bind(address: &str) -> Self {
        let listener = std::net::TcpListener::bind(address).expect("Could not bind HTTP server");
        listener
            .set_nonblocking(true)
            .expect("Could not make HTTP listener non-blocking");

        let address = listener
            .local_addr()
            .expect("Could not get HTTP server address");

        let state = SharedState::default();
        let app = Router::new()
            .fallback(Self::respond)
            .with_state(state.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("Could not create mock server runtime");

            rt.block_on(async move {
                let listener =
                    TcpListener::from_std(listener).expect("Could not register HTTP listener");
                Self::serve(listener, app).await;
            });
        });

        Self { address, state }
    }

    /// What to pass as the client's base URL.
    pub fn base_url(&self) -> String {
        format!("http://{}/xml", self.address)
    }

    /// Answers `method` requests to `path` (relative to the base URL) with `body` and a 200.
    pub fn mock(&self, method: &str, path: &str, body: &str) {
        self.mock_with_status(method, path, 200, body);
    }

    /// Later registrations for the same method and path take precedence.
    pub fn mock_with_status(&self, method: &str, path: &str, status: u16, body: &str) {
        self.register(method, path, status, body, None);
    }

    /// Like [mock][MockServer::mock], but the reply only starts after `delay`.
    pub fn mock_with_delay(&self, method: &str, path: &str, body: &str, delay: Duration) {
        self.register(method, path, 200, body, Some(delay));
    }

    fn register(&self, method: &str, path: &str, status: u16, body: &str, delay: Option<Duration>) {
        let mut state = self.state.lock().expect("Mock server state poisoned");
        state.fixtures.push(Fixture {
            method: method.to_uppercase(),
            path: format!("/xml/{}", path.trim_start_matches('/')),
            status,
            body: body.to_string(),
            delay,
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .lock()
            .expect("Mock server state poisoned")
            .requests
            .clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }

    async fn serve(listener: TcpListener, app: Router) {
        loop {
            let (socket, _remote_addr) = match listener.accept().await {
                Ok(l) => l,
                Err(error) => {
                    error!("Could not accept connection: {error}");
                    continue;
                }
            };

            let tower_service = app.clone();

            tokio::spawn(async move {
                let socket = TokioIo::new(socket);
                let hyper_service =
                    hyper::service::service_fn(move |request: Request<Incoming>| {
                        tower_service.clone().call(request)
                    });

                let builder = server::conn::auto::Builder::new(TokioExecutor::new());
                if let Err(err) = builder.serve_connection(socket, hyper_service).await {
                    error!("Failed to serve connection: {err:#}");
                }
            });
        }
    }

    async fn respond(
        State(state): State<SharedState>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> Response {
        trace!("C: {method} {uri} {body}");

        let authorization = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let reply = {
            let mut state = state.lock().expect("Mock server state poisoned");
            state.requests.push(RecordedRequest {
                method: method.to_string(),
                path: uri.path().to_string(),
                authorization,
                body,
            });

            state
                .fixtures
                .iter()
                .rev()
                .find(|fixture| fixture.method == method.as_str() && fixture.path == uri.path())
                .map(|fixture| (fixture.status, fixture.body.clone(), fixture.delay))
        };

        match reply {
            Some((status, body, delay)) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }

                trace!("S: {status} {body}");
                (
                    StatusCode::from_u16(status).unwrap_or(StatusCode::OK),
                    [(CONTENT_TYPE, "application/xml")],
                    body,
                )
                    .into_response()
            }

            None => {
                error!("No fixture for {method} {}", uri.path());
                (StatusCode::NOT_FOUND, "No fixture registered").into_response()
            }
        }
    }
}
