use axum::{http::HeaderValue, middleware::from_fn_with_state, routing::get, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use nimbus_portal::config::{self, ServerConfig};
use nimbus_portal::handlers::{portal, public, AppState};
use nimbus_portal::middleware::session_middleware;
use nimbus_portal::{registry, session};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up PORTAL_* overrides
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Nimbus portal in {:?} mode", config.environment);

    let state = AppState {
        registry: registry::shared_registry(),
        session: session::provider_from_env(),
    };
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORTAL_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Nimbus portal listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    let server = &config::config().server;

    let mut app = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Portal API
        .route("/api/navigation/sidebar", get(portal::sidebar))
        .route("/api/session/whoami", get(portal::whoami))
        .route("/api/pages/*path", get(portal::page_data))
        // Everything else is guarded page navigation
        .fallback(portal::page)
        // Global middleware
        .layer(from_fn_with_state(state.clone(), session_middleware))
        .layer(cors_layer(server));

    if server.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app.with_state(state)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if !server.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
