//! Caller network-origin resolution.

use std::net::IpAddr;

use axum::http::HeaderMap;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolves the network origin of the caller.
///
/// Prefers the first `X-Forwarded-For` entry (set by fronting proxies),
/// then the socket peer address. Loopback origins collapse to an empty
/// string so the backend falls back to its own source detection.
pub fn caller_origin(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    let forwarded = headers
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(origin) = forwarded {
        return if is_local(origin) {
            String::new()
        } else {
            origin.to_owned()
        };
    }

    match peer {
        Some(addr) if !addr.is_loopback() => addr.to_string(),
        _ => String::new(),
    }
}

fn is_local(origin: &str) -> bool {
    matches!(origin, "::1" | "127.0.0.1")
}
