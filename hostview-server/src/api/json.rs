use axum::{Json, Router, extract::State, routing::get};
use tower_http::trace::TraceLayer;

use hostview_shared::metrics::Snapshot;

use crate::{metrics::SnapshotProvider, response::ServiceResult};

#[derive(Clone)]
pub struct JsonState {
    pub snapshots: SnapshotProvider,
}

pub fn router(state: JsonState) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn index(State(state): State<JsonState>) -> ServiceResult<Json<Snapshot>> {
    let snapshot = state.snapshots.snapshot().await?;
    Ok(Json(Snapshot::clone(&snapshot)))
}
