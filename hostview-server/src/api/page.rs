use std::{net::SocketAddr, sync::Arc};

use askama::Template;
use axum::{
    Router,
    extract::{ConnectInfo, Request, State},
    response::Html,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use hostview_shared::{
    fields::{Describable, FieldMap},
    metrics::Snapshot,
};

use crate::{
    api::client_ip,
    metrics::SnapshotProvider,
    response::{ServiceError, ServiceResult},
};

#[derive(Clone)]
pub struct PageState {
    pub response_text: Arc<str>,
    pub snapshots: SnapshotProvider,
}

/// One titled block of the page; each record is listed field by field.
pub struct Section {
    pub title: &'static str,
    pub records: Vec<FieldMap>,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    text: &'a str,
    snapshot: &'a Snapshot,
}

impl IndexTemplate<'_> {
    fn sections(&self) -> Vec<Section> {
        let snapshot = self.snapshot;
        let mut sections = Vec::new();

        if let Some(host) = &snapshot.host_info {
            sections.push(section("Host", std::slice::from_ref(host)));
        }
        if let Some(cpus) = &snapshot.cpu_info {
            sections.push(section("CPU", cpus));
        }
        if let Some(memory) = &snapshot.virtual_memory {
            sections.push(section("Virtual memory", std::slice::from_ref(memory)));
        }
        if let Some(disks) = &snapshot.disk_info {
            sections.push(section("Disk partitions", disks));
        }
        if let Some(nets) = &snapshot.net_info {
            sections.push(section("Network", nets));
        }
        sections
    }
}

fn section<T: Describable>(title: &'static str, records: &[T]) -> Section {
    Section {
        title,
        records: records.iter().map(Describable::fields).collect(),
    }
}

pub fn router(state: PageState) -> Router {
    Router::new()
        .route("/", get(index))
        .fallback(index)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn index(State(state): State<PageState>, req: Request) -> ServiceResult<Html<String>> {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(req.headers(), peer).ok_or(ServiceError::MissingRemoteAddr)?;
    info!("{} on {} request from {}", req.method(), req.uri().path(), ip);

    let snapshot = state.snapshots.snapshot().await?;
    let page = IndexTemplate {
        text: &state.response_text,
        snapshot: &snapshot,
    };
    Ok(Html(page.render()?))
}
