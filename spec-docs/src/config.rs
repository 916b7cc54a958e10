//! Configuration of the served spec document and documentation UI.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ui::Ui;

/// Env variable naming the JSON file [`Config::from_env`] loads.
pub const CONFIG_FILE_ENV: &str = "SPEC_DOCS_CONFIG_FILE";

const DEFAULT_BASE_PATH: &str = "/";
const DEFAULT_FILE_PATH: &str = "./swagger.json";
const DEFAULT_PATH: &str = "docs";
const DEFAULT_TITLE: &str = "Fiber API documentation";

/// Configuration for [`SpecDocs`][crate::SpecDocs].
///
/// [`Config::default`] holds the default value of every field. Fields left empty are filled
/// with the defaults by [`Config::with_defaults`] when [`SpecDocs`][crate::SpecDocs] is built,
/// so only the fields that differ from the defaults need to be set.
///
/// | Field | Default |
/// |---|---|
/// | `base_path` | `/` |
/// | `file_path` | `./swagger.json` |
/// | `path` | `docs` |
/// | `title` | `Fiber API documentation` |
/// | `spec_path` | derived from `file_path` |
/// | `ui` | [`Ui::SwaggerUi`] |
///
/// # Examples
///
/// _**Serve `./openapi.yaml` at `/api/openapi.yaml` and Swagger UI at `/api/docs`.**_
/// ```rust
/// # use spec_docs::Config;
/// let config = Config::new()
///     .base_path("/api")
///     .file_path("./openapi.yaml");
/// ```
///
/// _**Config loaded from JSON file.**_
/// ```json
/// {
///   "basePath": "/api",
///   "filePath": "./openapi.yaml",
///   "title": "Pet store",
///   "ui": { "kind": "redoc" }
/// }
/// ```
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Url prefix under which both the spec document and the UI are served.
    pub base_path: String,
    /// Location of the spec document on the file system. The document is served with
    /// `application/json` content type for `.json` files and `application/yaml` for `.yaml`
    /// and `.yml` files.
    pub file_path: PathBuf,
    /// Path of the UI relative to `base_path`.
    pub path: String,
    /// Title of the documentation page.
    pub title: String,
    /// Path of the spec document relative to `base_path`. When not set the file path is used
    /// as is, e.g. `./swagger.json` is served from `{base_path}/swagger.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_path: Option<String>,
    /// Documentation UI to serve.
    pub ui: Ui,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            path: DEFAULT_PATH.to_string(),
            title: DEFAULT_TITLE.to_string(),
            spec_path: None,
            ui: Ui::default(),
        }
    }
}

impl Config {
    /// Construct a new empty [`Config`]. Every field left empty resolves to its default.
    pub fn new() -> Self {
        Self {
            base_path: String::new(),
            file_path: PathBuf::new(),
            path: String::new(),
            title: String::new(),
            spec_path: None,
            ui: Ui::default(),
        }
    }

    /// Set url prefix of the served endpoints.
    pub fn base_path<P: Into<String>>(mut self, base_path: P) -> Self {
        self.base_path = base_path.into();

        self
    }

    /// Set file system location of the spec document.
    pub fn file_path<P: Into<PathBuf>>(mut self, file_path: P) -> Self {
        self.file_path = file_path.into();

        self
    }

    /// Set path of the UI relative to the base path.
    pub fn path<P: Into<String>>(mut self, path: P) -> Self {
        self.path = path.into();

        self
    }

    /// Set title of the documentation page.
    pub fn title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = title.into();

        self
    }

    /// Set path of the spec document relative to the base path instead of deriving it from
    /// the file path.
    pub fn spec_path<P: Into<String>>(mut self, spec_path: P) -> Self {
        self.spec_path = Some(spec_path.into());

        self
    }

    /// Set the documentation UI.
    ///
    /// ```rust
    /// # use spec_docs::{Config, ui::Redoc};
    /// let config = Config::new().ui(Redoc::new());
    /// ```
    pub fn ui<U: Into<Ui>>(mut self, ui: U) -> Self {
        self.ui = ui.into();

        self
    }

    /// Replace empty fields with their defaults. Blank strings count as empty and a blank
    /// `spec_path` is unset.
    ///
    /// ```rust
    /// # use spec_docs::Config;
    /// let config = Config::new().title("Pet store").with_defaults();
    ///
    /// assert_eq!(config.title, "Pet store");
    /// assert_eq!(config.base_path, "/");
    /// assert_eq!(config.path, "docs");
    /// ```
    pub fn with_defaults(mut self) -> Self {
        let defaults = Config::default();

        if is_blank(&self.base_path) {
            self.base_path = defaults.base_path;
        }
        if self.file_path.as_os_str().is_empty() || self.file_path.to_str().is_some_and(is_blank) {
            self.file_path = defaults.file_path;
        }
        if is_blank(&self.path) {
            self.path = defaults.path;
        }
        if is_blank(&self.title) {
            self.title = defaults.title;
        }
        if self.spec_path.as_deref().is_some_and(is_blank) {
            self.spec_path = None;
        }

        self
    }

    /// Load [`Config`] from a JSON file. Keys are camelCase and all of them are optional.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load [`Config`] from the JSON file named by the _**`SPEC_DOCS_CONFIG_FILE`**_ env
    /// variable. The path is relative to the working directory of the application.
    ///
    /// ```bash
    /// SPEC_DOCS_CONFIG_FILE=spec-docs.json cargo run
    /// ```
    pub fn from_env() -> Result<Self> {
        let path = env::var_os(CONFIG_FILE_ENV).ok_or(Error::MissingConfigEnv(CONFIG_FILE_ENV))?;

        Self::from_file(path)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
