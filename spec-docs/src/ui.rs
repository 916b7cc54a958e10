//! Documentation UI renderers.
//!
//! A renderer turns the spec url and the documentation title into a servable HTML page. The
//! page is rendered once when [`SpecDocs`][crate::SpecDocs] is built and the result is served
//! as is for every request to the UI url.
//!
//! Two renderers are bundled, [`SwaggerUi`] (the default) and [`Redoc`]. Both load their
//! browser side assets from a CDN by default and allow overriding the asset urls or the whole
//! HTML template. Anything implementing [`UiRenderer`], including plain closures, can be used
//! with [`SpecDocs::with_renderer`][crate::SpecDocs::with_renderer].
//!
//! # Templates
//!
//! Custom templates given with `custom_html` may use the following variables:
//!
//! * **`$specUrl`** Url path of the served spec document. It only contains characters valid in
//!   an url path so it can be placed as is inside a double quoted HTML attribute or JavaScript
//!   string.
//! * **`$title`** HTML escaped documentation title.
//!
//! [`SwaggerUi`] templates additionally get `$bundleUrl`, `$presetUrl`, `$stylesUrl`,
//! `$favicon32` and `$favicon16`, [`Redoc`] templates get `$scriptUrl`. Asset urls are HTML
//! escaped.

use serde::{Deserialize, Serialize};

const SWAGGER_UI_HTML: &str = include_str!("../res/swagger-ui.html");
const REDOC_HTML: &str = include_str!("../res/redoc.html");

const SWAGGER_UI_DIST: &str = "https://unpkg.com/swagger-ui-dist";
const REDOC_STANDALONE: &str = "https://cdn.redoc.ly/redoc/latest/bundles/redoc.standalone.js";

/// Renders the documentation UI page for a spec url and title.
///
/// Implemented for [`SwaggerUi`], [`Redoc`], [`Ui`] and closures of
/// `Fn(&str, &str) -> String` taking the spec url and the title.
///
/// # Examples
///
/// _**Render a RapiDoc page with a closure.**_
/// ```rust
/// # use spec_docs::ui::UiRenderer;
/// let rapidoc = |spec_url: &str, _title: &str| {
///     format!(r#"<rapi-doc spec-url="{spec_url}"></rapi-doc>"#)
/// };
///
/// assert_eq!(
///     rapidoc.render("/openapi.json", "Api"),
///     r#"<rapi-doc spec-url="/openapi.json"></rapi-doc>"#
/// );
/// ```
pub trait UiRenderer {
    /// Render the HTML page which loads the spec document from _`spec_url`_.
    fn render(&self, spec_url: &str, title: &str) -> String;
}

impl<F: Fn(&str, &str) -> String> UiRenderer for F {
    fn render(&self, spec_url: &str, title: &str) -> String {
        self(spec_url, title)
    }
}

/// Selection of the bundled documentation UI.
///
/// This is what [`Config`][crate::Config] carries so that the UI can be chosen from a config
/// file as well. In JSON the variant is given with a `kind` tag.
///
/// ```json
/// { "kind": "redoc", "scriptUrl": "/assets/redoc.standalone.js" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Ui {
    /// Serve [`SwaggerUi`].
    SwaggerUi(SwaggerUi),
    /// Serve [`Redoc`].
    Redoc(Redoc),
}

impl Default for Ui {
    fn default() -> Self {
        Self::SwaggerUi(SwaggerUi::default())
    }
}

impl From<SwaggerUi> for Ui {
    fn from(value: SwaggerUi) -> Self {
        Self::SwaggerUi(value)
    }
}

impl From<Redoc> for Ui {
    fn from(value: Redoc) -> Self {
        Self::Redoc(value)
    }
}

impl UiRenderer for Ui {
    fn render(&self, spec_url: &str, title: &str) -> String {
        match self {
            Self::SwaggerUi(swagger_ui) => swagger_ui.render(spec_url, title),
            Self::Redoc(redoc) => redoc.render(spec_url, title),
        }
    }
}

/// [Swagger UI][swagger_ui] page loading the assets from given urls.
///
/// # Examples
///
/// _**Load Swagger UI from self hosted assets.**_
/// ```rust
/// # use spec_docs::ui::SwaggerUi;
/// let swagger_ui = SwaggerUi::new()
///     .bundle_url("/assets/swagger-ui-bundle.js")
///     .preset_url("/assets/swagger-ui-standalone-preset.js")
///     .styles_url("/assets/swagger-ui.css");
/// ```
///
/// [swagger_ui]: <https://swagger.io/tools/swagger-ui/>
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwaggerUi {
    /// Url of `swagger-ui-bundle.js`.
    pub bundle_url: String,
    /// Url of `swagger-ui-standalone-preset.js`.
    pub preset_url: String,
    /// Url of `swagger-ui.css`.
    pub styles_url: String,
    /// Url of the 32x32 favicon.
    pub favicon_32: String,
    /// Url of the 16x16 favicon.
    pub favicon_16: String,
    /// Template overriding the bundled one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_html: Option<String>,
}

impl Default for SwaggerUi {
    fn default() -> Self {
        Self {
            bundle_url: format!("{SWAGGER_UI_DIST}/swagger-ui-bundle.js"),
            preset_url: format!("{SWAGGER_UI_DIST}/swagger-ui-standalone-preset.js"),
            styles_url: format!("{SWAGGER_UI_DIST}/swagger-ui.css"),
            favicon_32: format!("{SWAGGER_UI_DIST}/favicon-32x32.png"),
            favicon_16: format!("{SWAGGER_UI_DIST}/favicon-16x16.png"),
            custom_html: None,
        }
    }
}

impl SwaggerUi {
    /// Construct a new [`SwaggerUi`] loading its assets from `unpkg.com`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override url of `swagger-ui-bundle.js`.
    pub fn bundle_url<U: Into<String>>(mut self, url: U) -> Self {
        self.bundle_url = url.into();

        self
    }

    /// Override url of `swagger-ui-standalone-preset.js`.
    pub fn preset_url<U: Into<String>>(mut self, url: U) -> Self {
        self.preset_url = url.into();

        self
    }

    /// Override url of `swagger-ui.css`.
    pub fn styles_url<U: Into<String>>(mut self, url: U) -> Self {
        self.styles_url = url.into();

        self
    }

    /// Override the 32x32 and 16x16 favicon urls.
    pub fn favicons<U: Into<String>>(mut self, favicon_32: U, favicon_16: U) -> Self {
        self.favicon_32 = favicon_32.into();
        self.favicon_16 = favicon_16.into();

        self
    }

    /// Override the bundled HTML template. See [module documentation][crate::ui#templates] for
    /// the available variables.
    pub fn custom_html<H: Into<String>>(mut self, html: H) -> Self {
        self.custom_html = Some(html.into());

        self
    }
}

impl UiRenderer for SwaggerUi {
    fn render(&self, spec_url: &str, title: &str) -> String {
        let template = self.custom_html.as_deref().unwrap_or(SWAGGER_UI_HTML);

        fill(
            template,
            &[
                ("specUrl", spec_url.to_string()),
                ("title", escape_html(title)),
                ("bundleUrl", escape_html(&self.bundle_url)),
                ("presetUrl", escape_html(&self.preset_url)),
                ("stylesUrl", escape_html(&self.styles_url)),
                ("favicon32", escape_html(&self.favicon_32)),
                ("favicon16", escape_html(&self.favicon_16)),
            ],
        )
    }
}

/// [Redoc][redoc] page loading the standalone bundle from given url.
///
/// [redoc]: <https://redocly.com/>
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Redoc {
    /// Url of `redoc.standalone.js`.
    pub script_url: String,
    /// Template overriding the bundled one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_html: Option<String>,
}

impl Default for Redoc {
    fn default() -> Self {
        Self {
            script_url: REDOC_STANDALONE.to_string(),
            custom_html: None,
        }
    }
}

impl Redoc {
    /// Construct a new [`Redoc`] loading the latest standalone bundle from `cdn.redoc.ly`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override url of `redoc.standalone.js`.
    pub fn script_url<U: Into<String>>(mut self, url: U) -> Self {
        self.script_url = url.into();

        self
    }

    /// Override the bundled HTML template. See [module documentation][crate::ui#templates] for
    /// the available variables.
    pub fn custom_html<H: Into<String>>(mut self, html: H) -> Self {
        self.custom_html = Some(html.into());

        self
    }
}

impl UiRenderer for Redoc {
    fn render(&self, spec_url: &str, title: &str) -> String {
        let template = self.custom_html.as_deref().unwrap_or(REDOC_HTML);

        fill(
            template,
            &[
                ("specUrl", spec_url.to_string()),
                ("title", escape_html(title)),
                ("scriptUrl", escape_html(&self.script_url)),
            ],
        )
    }
}

/// Replace `$name` variables of the template in a single pass so that substituted values are
/// never expanded again. A name only matches as a whole word, `$titleSuffix` is left as is.
fn fill(template: &str, variables: &[(&str, String)]) -> String {
    let mut html = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(index) = rest.find('$') {
        html.push_str(&rest[..index]);
        let tail = &rest[index + 1..];

        let word = tail
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .map_or(tail, |end| &tail[..end]);

        match variables.iter().find(|(name, _)| *name == word) {
            Some((name, value)) => {
                html.push_str(value);
                rest = &tail[name.len()..];
            }
            None => {
                html.push('$');
                rest = tail;
            }
        }
    }
    html.push_str(rest);

    html
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swagger_ui_renders_spec_url_and_title() {
        let html = SwaggerUi::new().render("/api/openapi.json", "Pet store");

        assert!(html.contains(r#"url: "/api/openapi.json","#), "{html}");
        assert!(html.contains("<title>Pet store</title>"), "{html}");
        assert!(html.contains(
            r#"<script src="https://unpkg.com/swagger-ui-dist/swagger-ui-bundle.js"></script>"#
        ));
        assert!(!html.contains("$specUrl"));
    }

    #[test]
    fn swagger_ui_uses_overridden_assets() {
        let html = SwaggerUi::new()
            .bundle_url("/assets/bundle.js")
            .styles_url("/assets/ui.css?v=1&dark")
            .render("/openapi.json", "Api");

        assert!(html.contains(r#"<script src="/assets/bundle.js"></script>"#));
        assert!(html.contains(r#"href="/assets/ui.css?v=1&amp;dark""#));
    }

    #[test]
    fn title_is_html_escaped() {
        let html = Redoc::new().render("/openapi.json", r#"<script>alert("x")</script>"#);

        assert!(html.contains(
            "<title>&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;</title>"
        ));
    }

    #[test]
    fn redoc_renders_spec_url() {
        let html = Redoc::new().render("/docs/openapi.yaml", "Api");

        assert!(html.contains(r#"<redoc spec-url="/docs/openapi.yaml"></redoc>"#));
        assert!(html.contains(REDOC_STANDALONE));
    }

    #[test]
    fn custom_html_keeps_unknown_variables() {
        let html = Redoc::new()
            .custom_html("$title costs $5 at $specUrl")
            .render("/openapi.json", "Api");

        assert_eq!(html, "Api costs $5 at /openapi.json");
    }

    #[test]
    fn variables_match_whole_names_only() {
        let html = Redoc::new()
            .custom_html("$titleSuffix $title_x $title-x $title")
            .render("/openapi.json", "Api");

        assert_eq!(html, "$titleSuffix $title_x Api-x Api");
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let html = SwaggerUi::new()
            .custom_html("$title|$specUrl")
            .render("/openapi.json", "$specUrl");

        assert_eq!(html, "$specUrl|/openapi.json");
    }

    #[test]
    fn ui_deserializes_from_kind_tag() {
        let ui: Ui = serde_json::from_str(r#"{"kind": "redoc", "scriptUrl": "/redoc.js"}"#)
            .expect("ui should deserialize");

        assert_eq!(ui, Ui::Redoc(Redoc::new().script_url("/redoc.js")));

        let ui: Ui = serde_json::from_str(r#"{"kind": "swagger-ui"}"#).expect("ui should deserialize");
        assert_eq!(ui, Ui::default());
    }
}
