use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use spool_planner::error::PlanError;
use spool_planner::input::check_bounds;
use spool_planner::solver::Solver;
use spool_planner::subset::DEFAULT_MAX_POOL;
use spool_planner::types::{Group, Item, items_from_lengths};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct PlanRequest {
    #[serde(default)]
    lengths: Vec<u32>,
    #[serde(default)]
    items: Vec<ItemRequest>,
    #[serde(default = "default_capacity")]
    capacity: i64,
    #[serde(default)]
    max_length: Option<u32>,
    /// Can only lower the server's own search ceiling.
    #[serde(default)]
    max_pool: Option<usize>,
}

#[derive(Deserialize, Serialize)]
struct ItemRequest {
    label: String,
    value: u32,
}

fn default_capacity() -> i64 {
    305
}

#[derive(Clone, Copy)]
struct AppState {
    max_pool: usize,
}

#[derive(Serialize)]
struct PlanResponse {
    groups: Vec<Group>,
    capacity: u32,
    group_count: usize,
    total_waste: u64,
    waste_percent: f64,
}

type ApiError = (StatusCode, String);

fn to_items(req: &PlanRequest) -> Result<Vec<Item>, ApiError> {
    if !req.lengths.is_empty() && !req.items.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "give either lengths or items, not both".to_string(),
        ));
    }

    let items = if req.items.is_empty() {
        items_from_lengths(&req.lengths)
    } else {
        req.items
            .iter()
            .enumerate()
            .map(|(i, it)| Item::labelled(i, it.label.clone(), it.value))
            .collect()
    };

    if let Some(it) = items.iter().find(|it| it.value == 0) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("{} has zero length", it.label),
        ));
    }
    if let Some(max) = req.max_length {
        check_bounds(&items, max).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    }
    Ok(items)
}

fn capacity(req: &PlanRequest) -> Result<u32, ApiError> {
    u32::try_from(req.capacity)
        .ok()
        .filter(|&c| c > 0)
        .ok_or_else(|| {
            let e = PlanError::InvalidCapacity {
                capacity: req.capacity,
            };
            (StatusCode::BAD_REQUEST, e.to_string())
        })
}

fn plan(req: &PlanRequest, ceiling: usize) -> Result<PlanResponse, ApiError> {
    let capacity = capacity(req)?;
    let items = to_items(req)?;
    let max_pool = req.max_pool.map_or(ceiling, |n| n.min(ceiling));

    let plan = Solver::new(capacity, items)
        .with_max_pool(max_pool)
        .solve()
        .map_err(|e| match e {
            PlanError::InvalidCapacity { .. } => (StatusCode::BAD_REQUEST, e.to_string()),
            _ => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        })?;

    Ok(PlanResponse {
        group_count: plan.group_count(),
        total_waste: plan.total_waste(),
        waste_percent: plan.total_waste_percent(),
        capacity: plan.capacity,
        groups: plan.groups,
    })
}

async fn plan_handler(
    State(state): State<AppState>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /plan"
    );
    tokio::task::spawn_blocking(move || plan(&req, state.max_pool))
        .await
        .map_err(|e| {
            tracing::error!("planning task failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "planning failed".to_string())
        })?
        .map(Json)
}

#[tokio::main]
async fn main() {
    let log_file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("failed to open development.log: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let _sentry = sentry::init((
        std::env::var("SENTRY_DSN").ok(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");
    let max_pool = match std::env::var("MAX_POOL") {
        Ok(v) => v.parse::<usize>().unwrap_or_else(|_| {
            eprintln!("invalid MAX_POOL '{v}', expected a whole number");
            std::process::exit(1);
        }),
        Err(_) => DEFAULT_MAX_POOL,
    };
    tracing::info!(max_pool, "search ceiling");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/plan", post(plan_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(AppState { max_pool });

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    eprintln!("Listening on {addr}");
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("server error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> PlanRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults() {
        let req = request(r#"{"lengths": [200, 200, 200]}"#);
        assert_eq!(req.capacity, 305);
        assert_eq!(req.max_pool, None);
        let resp = plan(&req, DEFAULT_MAX_POOL).unwrap();
        assert_eq!(resp.group_count, 3);
        assert_eq!(resp.total_waste, 3 * 105);
    }

    #[test]
    fn test_labelled_items() {
        let req = request(
            r#"{"items": [{"label": "A", "value": 100}, {"label": "B", "value": 100}, {"label": "C", "value": 200}]}"#,
        );
        let resp = plan(&req, DEFAULT_MAX_POOL).unwrap();
        assert_eq!(resp.groups[0].labels(), vec!["A", "C"]);
        assert_eq!(resp.groups[1].labels(), vec!["B"]);
    }

    #[test]
    fn test_negative_capacity() {
        let req = request(r#"{"lengths": [1], "capacity": -5}"#);
        let (status, msg) = plan(&req, DEFAULT_MAX_POOL).err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(msg.contains("-5"));
    }

    #[test]
    fn test_oversized_is_unprocessable() {
        let req = request(r#"{"lengths": [400]}"#);
        let (status, msg) = plan(&req, DEFAULT_MAX_POOL).err().unwrap();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(msg.contains("Node 1 (400)"));
    }

    #[test]
    fn test_bounds_and_zero_length_rejected() {
        let req = request(r#"{"lengths": [50, 150], "max_length": 100}"#);
        let (status, _) = plan(&req, DEFAULT_MAX_POOL).err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let req = request(r#"{"lengths": [50, 0]}"#);
        let (status, msg) = plan(&req, DEFAULT_MAX_POOL).err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, "Node 2 has zero length");
    }

    #[test]
    fn test_scale_limit_is_unprocessable() {
        let req = request(r#"{"lengths": [1, 1, 1, 1], "max_pool": 3}"#);
        assert_eq!(
            plan(&req, DEFAULT_MAX_POOL).err().unwrap().0,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_request_cannot_raise_ceiling() {
        let lengths = vec!["1"; 25].join(", ");
        let req = request(&format!(r#"{{"lengths": [{lengths}], "max_pool": 32}}"#));
        let (status, msg) = plan(&req, DEFAULT_MAX_POOL).err().unwrap();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let expected = PlanError::ScaleLimitExceeded {
            size: 25,
            limit: DEFAULT_MAX_POOL,
        };
        assert_eq!(msg, expected.to_string());
    }
}
