//! Local redirect target for the external login service

use crate::error::AuthError;
use http_body_util::Full;
use hyper::{
    Method, Request, Response, StatusCode, body::Bytes, server::conn::http1, service::service_fn,
};
use hyper_util::rt::TokioIo;
use secrecy::SecretString;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::{net::TcpListener, sync::oneshot, time::Duration};

/// How long to wait for the browser to come back.
pub const CALLBACK_TIMEOUT: Duration = Duration::from_secs(300);

/// Query parameters the auth service may use to carry the token.
const TOKEN_PARAMS: [&str; 3] = ["token", "access_token", "ag-token"];

type TokenSender = Arc<Mutex<Option<oneshot::Sender<String>>>>;

/// A bound `127.0.0.1` listener waiting for `GET /callback?token=...&state=...`
#[derive(Debug)]
pub struct CallbackServer {
    listener: TcpListener,
    addr: SocketAddr,
}

impl CallbackServer {
    /// Bind the callback port. Port 0 picks a free port.
    pub async fn bind(port: u16) -> Result<Self, AuthError> {
        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AuthError::Network(format!("Failed to bind callback server: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| AuthError::Network(e.to_string()))?;
        Ok(Self { listener, addr })
    }

    /// Address actually bound
    pub const fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Value for the `redirect_uri` parameter
    pub fn redirect_uri(&self) -> String {
        format!("http://127.0.0.1:{}/callback", self.addr.port())
    }

    /// Serve connections until a request with the expected state delivers a token.
    ///
    /// Requests with a missing or wrong state get an HTML error page and the
    /// server keeps waiting.
    pub async fn wait_for_token(
        self,
        expected_state: &str,
        limit: Duration,
    ) -> Result<SecretString, AuthError> {
        let (tx, mut rx) = oneshot::channel::<String>();
        let tx: TokenSender = Arc::new(Mutex::new(Some(tx)));
        let expected: Arc<str> = Arc::from(expected_state);

        let serve = async {
            loop {
                tokio::select! {
                    token = &mut rx => {
                        return token.map_err(|_| AuthError::Other("Callback cancelled".into()));
                    }
                    conn = self.listener.accept() => {
                        let (stream, _) = conn.map_err(|e| AuthError::Network(e.to_string()))?;
                        spawn_connection(stream, Arc::clone(&tx), Arc::clone(&expected));
                    }
                }
            }
        };

        match tokio::time::timeout(limit, serve).await {
            Ok(token) => token.map(SecretString::from),
            Err(_) => Err(AuthError::Other(format!(
                "Login callback timed out after {} seconds",
                limit.as_secs()
            ))),
        }
    }
}

fn spawn_connection(stream: tokio::net::TcpStream, tx: TokenSender, expected: Arc<str>) {
    tokio::spawn(async move {
        let service = service_fn(move |req: Request<hyper::body::Incoming>| {
            let response = handle(&req, &expected, &tx);
            async move { Ok::<_, Infallible>(response) }
        });
        if let Err(e) = http1::Builder::new()
            .serve_connection(TokioIo::new(stream), service)
            .await
        {
            tracing::debug!("callback connection ended: {e}");
        }
    });
}

fn handle<B>(req: &Request<B>, expected: &str, tx: &TokenSender) -> Response<Full<Bytes>> {
    if req.method() != Method::GET || req.uri().path() != "/callback" {
        return page(StatusCode::NOT_FOUND, "Not Found");
    }

    let params: Vec<(String, String)> = req
        .uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let lookup = |key: &str| {
        params
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
    };

    if let Some(error) = lookup("error") {
        return failure(&format!("The login service reported: {}", escape(&error)));
    }

    match lookup("state") {
        None => return failure("Missing state parameter"),
        Some(state) if state != expected => return failure("Invalid state parameter"),
        Some(_) => {}
    }

    let Some(token) = TOKEN_PARAMS.iter().find_map(|k| lookup(k)) else {
        return failure("Missing token parameter");
    };

    if let Some(sender) = tx.lock().unwrap_or_else(PoisonError::into_inner).take() {
        // The receiver only goes away once the wait has ended
        let _ = sender.send(token);
    }

    page(
        StatusCode::OK,
        "<h1>Signed in</h1><p>You can close this tab and return to the terminal.</p>",
    )
}

fn failure(reason: &str) -> Response<Full<Bytes>> {
    page(
        StatusCode::BAD_REQUEST,
        &format!("<h1>Sign-in failed</h1><p>{reason}</p>"),
    )
}

fn page(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    let html = format!("<!DOCTYPE html><html><body>{body}</body></html>");
    let mut response = Response::new(Full::new(Bytes::from(html)));
    *response.status_mut() = status;
    response
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
