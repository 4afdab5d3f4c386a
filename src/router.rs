use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::handlers::named::{self, Ingredients, NamedCollection, Tags};
use crate::handlers::{recipes, system};
use crate::middleware::require_caller;
use crate::state::AppState;

/// Build the full application router around the given state.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    // Every resource route requires a bearer token
    let protected = Router::new()
        .merge(recipe_routes())
        .merge(named_routes::<Tags>("/tags"))
        .merge(named_routes::<Ingredients>("/ingredients"))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_caller));

    let mut app = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(protected)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    // Global middleware
    if config.security.enable_cors {
        app = app.layer(cors_layer(&config));
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/recipes/:id",
            get(recipes::get)
                .put(recipes::put)
                .patch(recipes::patch)
                .delete(recipes::delete),
        )
}

// Tags and ingredients: no create, so the collection path only lists.
fn named_routes<C: NamedCollection>(path: &str) -> Router<AppState> {
    Router::new().route(path, get(named::list::<C>)).route(
        &format!("{path}/:id"),
        get(named::get::<C>)
            .put(named::put::<C>)
            .patch(named::patch::<C>)
            .delete(named::delete::<C>),
    )
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
