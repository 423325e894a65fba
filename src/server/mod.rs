//! Preview server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use notify::Watcher;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::net::SocketAddr;
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate::{is_relevant, watch_paths};
use crate::helpers::{post_path, url_for};
use crate::render::DetailRequest;
use crate::Folio;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Server state
struct ServerState {
    folio: Folio,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Start the preview server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        folio: folio.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let app = router(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let folio = folio.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_and_reload(folio, reload_tx).await {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/__livereload", get(livereload_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Rebuild on source changes and tell connected pages to reload
async fn watch_and_reload(folio: Folio, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |res: DebounceEventResult| {
            let _ = tx.send(res);
        },
    )?;

    for (path, mode) in watch_paths(&folio) {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    while let Some(res) = rx.recv().await {
        let events = match res {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<_> = events.iter().filter(|e| is_relevant(&folio, &e.path)).collect();
        if changed.is_empty() {
            continue;
        }

        println!();
        for event in &changed {
            println!("File changed: {}", event.path.display());
        }

        // Config edits need a fresh site handle
        let site = Folio::new(&folio.base_dir).unwrap_or_else(|e| {
            tracing::warn!("Keeping previous config: {}", e);
            folio.clone()
        });

        println!("Regenerating...");
        match site.generate().await {
            Ok(_) => {
                println!("Regenerated successfully!");
                let _ = reload_tx.send(());
            }
            Err(e) => {
                println!("Generation failed: {}", e);
            }
        }
    }

    Ok(())
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Where a `post.html?id=...` request should land, if anywhere
fn query_redirect(folio: &Folio, path: &str, query: Option<&str>) -> Option<String> {
    if path != "/post.html" {
        return None;
    }
    let request = DetailRequest::from_query(query?);
    let id = request.id()?;
    Some(url_for(&folio.config, &post_path(&folio.config, id)))
}

/// Resolve a request path to a file under the public directory
///
/// The path is percent-decoded first, matching how pages are written to
/// disk. Paths that would step outside the directory resolve to nothing.
fn resolve_file(public_dir: &Path, path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(path).decode_utf8().ok()?;
    let clean_path = decoded.trim_start_matches('/');
    if clean_path.is_empty() {
        return Some(public_dir.join("index.html"));
    }
    if !Path::new(clean_path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let candidate = public_dir.join(clean_path);
    if candidate.is_dir() {
        Some(candidate.join("index.html"))
    } else if candidate.exists() {
        Some(candidate)
    } else {
        let with_html = public_dir.join(format!("{}.html", clean_path.trim_end_matches('/')));
        if with_html.exists() {
            Some(with_html)
        } else {
            Some(candidate)
        }
    }
}

/// Serve files, forwarding query-addressed detail pages and injecting the
/// live reload script into HTML
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();

    if let Some(target) = query_redirect(&state.folio, &path, request.uri().query()) {
        return Redirect::temporary(&target).into_response();
    }

    let html_file = resolve_file(&state.folio.public_dir, &path).filter(|file| {
        file.extension()
            .map(|ext| ext == "html" || ext == "htm")
            .unwrap_or(false)
    });

    if let (Some(file_path), true) = (html_file, state.live_reload) {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    } else {
        let mut service =
            ServeDir::new(&state.folio.public_dir).append_index_html_on_directories(true);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", LIVE_RELOAD_SCRIPT, 1)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_query_redirect() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        assert_eq!(
            query_redirect(&folio, "/post.html", Some("id=a1")),
            Some("/post/a1/".to_string())
        );
        assert_eq!(
            query_redirect(&folio, "/post.html", Some("id=a%201")),
            Some("/post/a%201/".to_string())
        );
        assert_eq!(query_redirect(&folio, "/post.html", None), None);
        assert_eq!(query_redirect(&folio, "/post.html", Some("id=")), None);
        assert_eq!(query_redirect(&folio, "/blog.html", Some("id=a1")), None);
    }

    #[test]
    fn test_resolve_file() {
        let dir = TempDir::new().unwrap();
        let public = dir.path();
        fs::create_dir_all(public.join("post/a1")).unwrap();
        fs::write(public.join("post/a1/index.html"), "").unwrap();
        fs::write(public.join("blog.html"), "").unwrap();

        assert_eq!(resolve_file(public, "/"), Some(public.join("index.html")));
        assert_eq!(
            resolve_file(public, "/post/a1/"),
            Some(public.join("post/a1/index.html"))
        );
        assert_eq!(resolve_file(public, "/blog"), Some(public.join("blog.html")));
    }

    #[test]
    fn test_resolve_file_decodes_path() {
        let dir = TempDir::new().unwrap();
        let public = dir.path();
        fs::create_dir_all(public.join("post/a 1")).unwrap();
        fs::write(public.join("post/a 1/index.html"), "").unwrap();

        assert_eq!(
            resolve_file(public, "/post/a%201/"),
            Some(public.join("post/a 1/index.html"))
        );
        assert_eq!(resolve_file(public, "/post/..%2F..%2Fsecret"), None);
        assert_eq!(resolve_file(public, "/../secret"), None);
    }

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body><p>x</p></body></html>");
        assert!(html.contains("__livereload"));
        assert_eq!(html.matches("</body>").count(), 1);
        assert!(inject_live_reload("<p>x</p>").ends_with("</body>\n"));
    }
}
