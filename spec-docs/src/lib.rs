#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(doc_cfg, feature(doc_cfg))]
//! This crate serves a static OpenAPI document together with a documentation UI consuming it
//! from within the request pipeline of a web server.
//!
//! [`SpecDocs`] reads the spec document once at startup and exposes it from two urls:
//!
//! * **`{base_path}/{spec_path}`** Raw bytes of the spec document with `application/json` or
//!   `application/yaml` content type depending on the file extension.
//! * **`{base_path}/{path}`** Documentation UI loading the spec document from the url above.
//!   [Swagger UI][swagger_ui] by default, [Redoc][redoc] or any custom [`UiRenderer`].
//!
//! Every other request is passed through to the rest of the pipeline untouched.
//!
//! # Crate Features
//!
//! * **axum** Allows serving [`SpecDocs`] as _**`tower`**_ middleware or as _**`axum`**_ routes.
//! * **actix-web** Allows serving [`SpecDocs`] as _**`actix-web`**_ middleware.
//!
//! # Install
//!
//! Use the framework independent [`SpecDocs`] only.
//! ```toml
//! [dependencies]
//! spec-docs = "0.1"
//! ```
//!
//! Enable the axum integration.
//! ```toml
//! [dependencies]
//! spec-docs = { version = "0.1", features = ["axum"] }
//! ```
//!
//! # Using standalone
//!
//! [`SpecDocs::route`] tells whether a request path targets one of the documentation
//! endpoints and [`SpecDocs::serve`] gives the content and content type to respond with.
//! ```no_run
//! use spec_docs::{Config, SpecDocs};
//!
//! # fn main() -> Result<(), spec_docs::Error> {
//! let docs = SpecDocs::new(Config::new().file_path("./openapi.json"))?;
//!
//! // Then somewhere in the request handling of your application.
//! if let Some(endpoint) = docs.route("/docs") {
//!     let file = docs.serve(endpoint);
//!     println!("respond with {} bytes of {}", file.bytes.len(), file.content_type);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Examples
//!
//! _**Serve [`SpecDocs`] as middleware of `axum` router.**_
//! ```no_run
//! use axum::{routing, Router};
//! use spec_docs::{axum::SpecDocsLayer, Config, SpecDocs};
//!
//! # fn main() -> Result<(), spec_docs::Error> {
//! let docs = SpecDocs::new(Config::new().base_path("/api").file_path("./openapi.yaml"))?;
//!
//! let app: Router = Router::new()
//!     .route("/api/pets", routing::get(|| async { "[]" }))
//!     .layer(SpecDocsLayer::new(docs).skip(|request| request.headers().contains_key("x-internal")));
//! # Ok(())
//! # }
//! ```
//!
//! _**Serve [`SpecDocs`] as middleware of `actix-web` app.**_
//! ```no_run
//! use actix_web::App;
//! use spec_docs::{actix::SpecDocsTransform, Config, SpecDocs};
//!
//! # fn main() -> Result<(), spec_docs::Error> {
//! let docs = SpecDocs::new(Config::new().file_path("./openapi.json"))?;
//!
//! let app = App::new().wrap(SpecDocsTransform::from(docs));
//! # Ok(())
//! # }
//! ```
//!
//! [swagger_ui]: <https://swagger.io/tools/swagger-ui/>
//! [redoc]: <https://redocly.com/>

use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;

pub mod actix;
pub mod axum;
mod config;
mod error;
pub mod path;
pub mod ui;

pub use config::{Config, CONFIG_FILE_ENV};
pub use error::{Error, Result};
pub use ui::UiRenderer;

/// Content type of the rendered documentation UI.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Methods answered on the documentation endpoints. Other methods get
/// `405 Method Not Allowed` with this as the `Allow` header.
#[cfg(any(feature = "axum", feature = "actix-web"))]
const ALLOWED_METHODS: &str = "GET, HEAD";

/// Endpoint of [`SpecDocs`] a request path targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    /// Raw spec document.
    Spec,
    /// Rendered documentation UI.
    Ui,
}

/// Servable content of an [`Endpoint`].
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct DocsFile<'a> {
    /// Content of the file.
    pub bytes: Bytes,
    /// Content type of the file e.g `"application/json"`.
    pub content_type: &'a str,
}

/// Spec document and documentation UI ready to be served.
///
/// Everything is resolved when [`SpecDocs`] is built: the spec document is read into memory,
/// the urls are derived and the UI page is rendered. Afterwards [`SpecDocs`] is read only and
/// cheap to clone, all clones share the same state.
#[derive(Clone, Debug)]
pub struct SpecDocs {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    spec_url: String,
    ui_url: String,
    title: String,
    spec: Bytes,
    content_type: Cow<'static, str>,
    html: Bytes,
}

impl SpecDocs {
    /// Build [`SpecDocs`] from _`config`_ using the UI selected with [`Config::ui`].
    ///
    /// Fails if the spec document does not exist or cannot be read, or if the configured paths
    /// do not join into two distinct valid url paths.
    pub fn new(config: Config) -> Result<Self> {
        let ui = config.ui.clone();

        Self::with_renderer(config, ui)
    }

    /// Build [`SpecDocs`] from _`config`_ rendering the documentation UI with _`renderer`_.
    /// [`Config::ui`] is ignored.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use spec_docs::{Config, SpecDocs};
    /// let docs = SpecDocs::with_renderer(Config::new(), |spec_url: &str, title: &str| {
    ///     format!(r#"<title>{title}</title><rapi-doc spec-url="{spec_url}"></rapi-doc>"#)
    /// });
    /// ```
    pub fn with_renderer<R: UiRenderer>(config: Config, renderer: R) -> Result<Self> {
        let config = config.with_defaults();

        let spec = read_spec(&config.file_path)?;

        let spec_segment = match config.spec_path.as_deref() {
            Some(spec_path) => Cow::Borrowed(spec_path),
            None => path::file_segment(&config.file_path)?,
        };
        let spec_url = path::join(&config.base_path, &spec_segment)?;
        let ui_url = path::join(&config.base_path, &config.path)?;
        if spec_url == ui_url {
            return Err(Error::ConflictingPaths(spec_url));
        }

        let html = renderer.render(&spec_url, &config.title);

        log::info!(
            "serving spec `{}` from {spec_url} and documentation ui from {ui_url}",
            config.file_path.display()
        );

        Ok(Self {
            inner: Arc::new(Inner {
                content_type: content_type(&config.file_path),
                spec_url,
                ui_url,
                title: config.title,
                spec,
                html: Bytes::from(html),
            }),
        })
    }

    /// Url path the spec document is served from.
    pub fn spec_url(&self) -> &str {
        &self.inner.spec_url
    }

    /// Url path the documentation UI is served from.
    pub fn ui_url(&self) -> &str {
        &self.inner.ui_url
    }

    /// Title of the documentation UI.
    pub fn title(&self) -> &str {
        &self.inner.title
    }

    /// Raw bytes of the spec document as read from the file system.
    pub fn spec(&self) -> &Bytes {
        &self.inner.spec
    }

    /// Content type the spec document is served with.
    pub fn content_type(&self) -> &str {
        &self.inner.content_type
    }

    /// Rendered documentation UI.
    pub fn html(&self) -> &Bytes {
        &self.inner.html
    }

    /// Resolve the [`Endpoint`] a request _`path`_ targets. Only exact matches count, any
    /// other path returns `None` and should be passed through.
    ///
    /// ```no_run
    /// # use spec_docs::{Config, Endpoint, SpecDocs};
    /// # fn main() -> Result<(), spec_docs::Error> {
    /// let docs = SpecDocs::new(Config::new().base_path("/api").file_path("./openapi.json"))?;
    ///
    /// assert_eq!(docs.route("/api/docs"), Some(Endpoint::Ui));
    /// assert_eq!(docs.route("/api/openapi.json"), Some(Endpoint::Spec));
    /// assert_eq!(docs.route("/v2/api/docs"), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn route(&self, path: &str) -> Option<Endpoint> {
        if path == self.inner.spec_url {
            Some(Endpoint::Spec)
        } else if path == self.inner.ui_url {
            Some(Endpoint::Ui)
        } else {
            None
        }
    }

    /// Get the servable content of an _`endpoint`_.
    pub fn serve(&self, endpoint: Endpoint) -> DocsFile<'_> {
        log::debug!("serving documentation {endpoint:?}");

        match endpoint {
            Endpoint::Spec => DocsFile {
                bytes: self.inner.spec.clone(),
                content_type: &self.inner.content_type,
            },
            Endpoint::Ui => DocsFile {
                bytes: self.inner.html.clone(),
                content_type: HTML_CONTENT_TYPE,
            },
        }
    }
}

fn read_spec(file_path: &Path) -> Result<Bytes> {
    match fs::read(file_path) {
        Ok(spec) => Ok(Bytes::from(spec)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Err(Error::SpecNotFound {
            path: file_path.to_path_buf(),
        }),
        Err(source) => Err(Error::ReadSpec {
            path: file_path.to_path_buf(),
            source,
        }),
    }
}

fn content_type(file_path: &Path) -> Cow<'static, str> {
    let extension = file_path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => Cow::Borrowed("application/json"),
        Some("yaml" | "yml") => Cow::Borrowed("application/yaml"),
        _ => Cow::Owned(
            mime_guess::from_path(file_path)
                .first_or_octet_stream()
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_from_file_extension() {
        assert_eq!(content_type(Path::new("./openapi.json")), "application/json");
        assert_eq!(content_type(Path::new("./openapi.yaml")), "application/yaml");
        assert_eq!(content_type(Path::new("specs/openapi.YML")), "application/yaml");
        assert_eq!(content_type(Path::new("openapi.txt")), "text/plain");
        assert_eq!(content_type(Path::new("openapi")), "application/octet-stream");
    }
}
