//! The transport seam: whatever actually performs the HTTP exchange.

use crate::request::PreparedRequest;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// A request in flight. Resolves to whatever the transport produced.
pub type Pending<R, E> = BoxFuture<'static, Result<R, E>>;

/// Performs the network exchange for a prepared request.
///
/// The client never inspects the response or the error; both are returned
/// to the caller exactly as the transport produced them.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    type Response: Send + 'static;
    type Error: Send + 'static;

    async fn fetch(&self, request: PreparedRequest) -> Result<Self::Response, Self::Error>;
}

#[async_trait]
impl<T: Transport> Transport for Arc<T> {
    type Response = T::Response;
    type Error = T::Error;

    async fn fetch(&self, request: PreparedRequest) -> Result<Self::Response, Self::Error> {
        (**self).fetch(request).await
    }
}

/// A transport backed by an async closure.
pub struct FnTransport<F> {
    f: F,
}

/// Adapt a closure `Fn(PreparedRequest) -> Future<Output = Result<R, E>>`
/// into a [`Transport`].
pub fn transport_fn<F, Fut, R, E>(f: F) -> FnTransport<F>
where
    F: Fn(PreparedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
{
    FnTransport { f }
}

#[async_trait]
impl<F, Fut, R, E> Transport for FnTransport<F>
where
    F: Fn(PreparedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
{
    type Response = R;
    type Error = E;

    async fn fetch(&self, request: PreparedRequest) -> Result<R, E> {
        (self.f)(request).await
    }
}

impl<F> std::fmt::Debug for FnTransport<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTransport").finish_non_exhaustive()
    }
}
