#![cfg(feature = "axum")]
#![cfg_attr(doc_cfg, doc(cfg(feature = "axum")))]
//! Serve [`SpecDocs`] via _**`axum`**_.
//!
//! [`SpecDocsLayer`] wraps any `tower` service taking axum requests, typically a whole
//! [`Router`], and answers the documentation endpoints before the request reaches it. Routers
//! can also be created directly from [`SpecDocs`] and merged to the application router.
//!
//! ```no_run
//! # use axum::Router;
//! # use spec_docs::{Config, SpecDocs};
//! # fn main() -> Result<(), spec_docs::Error> {
//! let docs = SpecDocs::new(Config::new().file_path("./openapi.json"))?;
//! let app = Router::<()>::new().merge(docs);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{routing, Router};
use tower_layer::Layer;
use tower_service::Service;

use crate::{Endpoint, SpecDocs, ALLOWED_METHODS};

type SkipFn = Arc<dyn Fn(&Request) -> bool + Send + Sync>;

/// [`Layer`] serving [`SpecDocs`] in front of the wrapped service.
///
/// Requests to the spec url or the UI url are answered by the layer and never reach the
/// wrapped service. Every other request is passed to the wrapped service untouched.
#[derive(Clone)]
pub struct SpecDocsLayer {
    docs: SpecDocs,
    skip: Option<SkipFn>,
}

impl SpecDocsLayer {
    /// Construct a new [`SpecDocsLayer`] serving _`docs`_.
    pub fn new(docs: SpecDocs) -> Self {
        Self { docs, skip: None }
    }

    /// Pass requests for which _`skip`_ returns `true` directly to the wrapped service without
    /// looking at their path.
    ///
    /// ```no_run
    /// # use spec_docs::{axum::SpecDocsLayer, Config, SpecDocs};
    /// # fn main() -> Result<(), spec_docs::Error> {
    /// # let docs = SpecDocs::new(Config::new())?;
    /// let layer = SpecDocsLayer::new(docs).skip(|request| !request.headers().contains_key("x-docs"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn skip<F>(mut self, skip: F) -> Self
    where
        F: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        self.skip = Some(Arc::new(skip));

        self
    }
}

impl From<SpecDocs> for SpecDocsLayer {
    fn from(docs: SpecDocs) -> Self {
        Self::new(docs)
    }
}

impl<S> Layer<S> for SpecDocsLayer {
    type Service = SpecDocsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SpecDocsService {
            inner,
            docs: self.docs.clone(),
            skip: self.skip.clone(),
        }
    }
}

/// Middleware created by [`SpecDocsLayer`].
#[derive(Clone)]
pub struct SpecDocsService<S> {
    inner: S,
    docs: SpecDocs,
    skip: Option<SkipFn>,
}

impl<S> Service<Request> for SpecDocsService<S>
where
    S: Service<Request, Response = Response>,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        if self.skip.as_ref().is_some_and(|skip| skip(&request)) {
            return Box::pin(self.inner.call(request));
        }

        match self.docs.route(request.uri().path()) {
            Some(endpoint) => {
                let response = respond(&self.docs, endpoint, request.method());
                Box::pin(async move { Ok(response) })
            }
            None => {
                log::trace!("passing through {}", request.uri().path());
                Box::pin(self.inner.call(request))
            }
        }
    }
}

/// Route the spec url and the UI url of [`SpecDocs`] with `GET` handlers.
///
/// The router must be [merged][Router::merge] to the application router. Nesting it changes
/// the path the handlers see and the endpoints will respond with `404 Not Found`.
///
/// The urls are registered as literal paths, segments starting with `:` or `*` included. Such
/// paths are rejected by a default [`Router`] when merging, so the application router needs
/// [`Router::without_v07_checks`] as well.
///
/// # Panics
///
/// Merging panics if the application router already has a route for either url.
impl<S> From<SpecDocs> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn from(docs: SpecDocs) -> Self {
        let spec_url = docs.spec_url().to_string();
        let ui_url = docs.ui_url().to_string();

        let handler = routing::get(move |uri: Uri| {
            let docs = docs.clone();
            async move { serve_routed(&docs, uri.path()) }
        });

        Router::<S>::new()
            .without_v07_checks()
            .route(&spec_url, handler.clone())
            .route(&ui_url, handler)
    }
}

fn serve_routed(docs: &SpecDocs, path: &str) -> Response {
    match docs.route(path) {
        Some(endpoint) => respond(docs, endpoint, &Method::GET),
        None => {
            log::warn!(
                "request to {path} reached documentation handler but matched neither {} nor {}",
                docs.spec_url(),
                docs.ui_url()
            );
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn respond(docs: &SpecDocs, endpoint: Endpoint, method: &Method) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, ALLOWED_METHODS)],
        )
            .into_response();
    }

    let file = docs.serve(endpoint);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, file.content_type)],
        file.bytes,
    )
        .into_response()
}
