//! Client-IP resolution middleware.
//!
//! Resolves the originating address of every request (first hop of
//! `X-Forwarded-For`, then `X-Real-IP`, then the peer socket address) and
//! stores it in the request extensions, where the [`ClientAddr`] extractor
//! makes it available to handlers.

use std::net::IpAddr;

use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::HeaderMap,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ready, Ready};

use crate::error::AppError;

/// Originating address of the request, as resolved by [`ClientIp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientAddr(pub IpAddr);

impl std::fmt::Display for ClientAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

pub struct ClientIp;

impl<S, B> Transform<S, ServiceRequest> for ClientIp
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ClientIpService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ClientIpService { service }))
    }
}

pub struct ClientIpService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ClientIpService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(addr) = resolve(&req) {
            req.extensions_mut().insert(ClientAddr(addr));
        }
        self.service.call(req)
    }
}

fn resolve(req: &ServiceRequest) -> Option<IpAddr> {
    forwarded_for(req.headers())
        .or_else(|| real_ip(req.headers()))
        .or_else(|| req.peer_addr().map(|addr| addr.ip()))
}

/// First entry of `X-Forwarded-For` is the client; later hops are proxies.
fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("X-Forwarded-For")?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

fn real_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers.get("X-Real-IP")?.to_str().ok()?.trim().parse().ok()
}

impl FromRequest for ClientAddr {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<ClientAddr>().copied() {
            Some(addr) => ready(Ok(addr)),
            None => ready(Err(AppError::internal(
                "client address not resolved; ClientIp middleware is not active",
            )
            .into())),
        }
    }
}
