pub mod json;
pub mod page;

use std::net::SocketAddr;

use axum::http::HeaderMap;

pub const REAL_IP_HEADER: &str = "x-forwarded-for";

/// Address used when logging a request. `None` when the connection carries no
/// peer address, which the caller treats as a server error.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let peer = peer?;
    let forwarded = headers
        .get(REAL_IP_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    Some(match forwarded {
        Some(real_ip) => real_ip.to_string(),
        None => peer.ip().to_string(),
    })
}
