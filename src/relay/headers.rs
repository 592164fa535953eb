//! Outbound header set.
//!
//! Built once from [`IdentityConfig`] at startup and cloned onto every
//! upstream request. Never mutated after construction.

use axum::http::{
    header::{self, InvalidHeaderValue},
    HeaderMap, HeaderValue,
};

use crate::config::IdentityConfig;

/// Immutable headers attached to each upstream request.
#[derive(Debug, Clone)]
pub struct OutboundHeaders {
    map: HeaderMap,
}

impl OutboundHeaders {
    /// Build the header set from the configured identity.
    pub fn from_identity(identity: &IdentityConfig) -> Result<Self, InvalidHeaderValue> {
        let mut map = HeaderMap::with_capacity(7);
        map.insert(header::USER_AGENT, HeaderValue::from_str(&identity.user_agent)?);
        map.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_str(&identity.accept_language)?,
        );
        map.insert(
            header::ACCEPT_ENCODING,
            HeaderValue::from_str(&identity.accept_encoding)?,
        );
        map.insert(header::ACCEPT, HeaderValue::from_str(&identity.accept)?);
        map.insert(header::REFERER, HeaderValue::from_str(&identity.referer)?);
        map.insert(header::ORIGIN, HeaderValue::from_str(&identity.origin)?);
        map.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        Ok(Self { map })
    }

    /// A fresh copy for one outbound request.
    pub fn to_header_map(&self) -> HeaderMap {
        self.map.clone()
    }
}
