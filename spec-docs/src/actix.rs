#![cfg(feature = "actix-web")]
#![cfg_attr(doc_cfg, doc(cfg(feature = "actix-web")))]
//! Serve [`SpecDocs`] via _**`actix-web`**_ middleware.

use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::sync::Arc;

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, Method};
use actix_web::{Error, HttpResponse};

use crate::{Endpoint, SpecDocs, ALLOWED_METHODS};

type SkipFn = Arc<dyn Fn(&ServiceRequest) -> bool + Send + Sync>;

/// Middleware factory serving [`SpecDocs`] for the wrapped app or scope.
///
/// Requests to the spec url or the UI url are answered by the middleware and never reach the
/// wrapped service. Every other request is passed to the wrapped service untouched.
///
/// # Examples
///
/// ```no_run
/// use actix_web::{web, App, HttpServer};
/// use spec_docs::{actix::SpecDocsTransform, Config, SpecDocs};
///
/// #[actix_web::main]
/// async fn main() -> std::io::Result<()> {
///     let docs = SpecDocs::new(Config::new().file_path("./openapi.json"))
///         .expect("documentation should be configured");
///
///     HttpServer::new(move || {
///         App::new()
///             .wrap(SpecDocsTransform::new(docs.clone()).skip(|request| request.path() == "/health"))
///             .route("/health", web::get().to(|| async { "ok" }))
///     })
///     .bind(("127.0.0.1", 8080))?
///     .run()
///     .await
/// }
/// ```
#[derive(Clone)]
pub struct SpecDocsTransform {
    docs: SpecDocs,
    skip: Option<SkipFn>,
}

impl SpecDocsTransform {
    /// Construct a new [`SpecDocsTransform`] serving _`docs`_.
    pub fn new(docs: SpecDocs) -> Self {
        Self { docs, skip: None }
    }

    /// Pass requests for which _`skip`_ returns `true` directly to the wrapped service without
    /// looking at their path.
    pub fn skip<F>(mut self, skip: F) -> Self
    where
        F: Fn(&ServiceRequest) -> bool + Send + Sync + 'static,
    {
        self.skip = Some(Arc::new(skip));

        self
    }
}

impl From<SpecDocs> for SpecDocsTransform {
    fn from(docs: SpecDocs) -> Self {
        Self::new(docs)
    }
}

impl<S, B> Transform<S, ServiceRequest> for SpecDocsTransform
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SpecDocsMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SpecDocsMiddleware {
            service,
            docs: self.docs.clone(),
            skip: self.skip.clone(),
        }))
    }
}

/// Middleware created by [`SpecDocsTransform`].
pub struct SpecDocsMiddleware<S> {
    service: S,
    docs: SpecDocs,
    skip: Option<SkipFn>,
}

impl<S, B> Service<ServiceRequest> for SpecDocsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, request: ServiceRequest) -> Self::Future {
        let skipped = self.skip.as_ref().is_some_and(|skip| skip(&request));
        let endpoint = if skipped {
            None
        } else {
            self.docs.route(request.path())
        };

        match endpoint {
            Some(endpoint) => {
                let response = respond(&self.docs, endpoint, request.method());
                Box::pin(ready(Ok(request.into_response(response).map_into_right_body())))
            }
            None => {
                let response = self.service.call(request);
                Box::pin(async move { response.await.map(ServiceResponse::map_into_left_body) })
            }
        }
    }
}

fn respond(docs: &SpecDocs, endpoint: Endpoint, method: &Method) -> HttpResponse {
    if method != Method::GET && method != Method::HEAD {
        return HttpResponse::MethodNotAllowed()
            .insert_header((header::ALLOW, ALLOWED_METHODS))
            .finish();
    }

    let file = docs.serve(endpoint);
    HttpResponse::Ok()
        .content_type(file.content_type)
        .body(file.bytes)
}
