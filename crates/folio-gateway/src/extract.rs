// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request metadata extraction.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};

use folio_core::RequestMeta;

/// Client address and user agent as observed by the server.
///
/// The address is the first `X-Forwarded-For` entry, then `X-Real-IP`,
/// then the TCP peer. Anything missing stays `None` and is stored as
/// `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMeta(pub RequestMeta);

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());
        Ok(Self(meta_from_headers(&parts.headers, peer)))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub fn meta_from_headers(headers: &HeaderMap, peer: Option<String>) -> RequestMeta {
    let forwarded = header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let ip_address = forwarded
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(str::to_string)
        .or(peer);
    let user_agent = header_str(headers, header::USER_AGENT.as_str()).map(str::to_string);

    RequestMeta {
        ip_address,
        user_agent,
    }
}
