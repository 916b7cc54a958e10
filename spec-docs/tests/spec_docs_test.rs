use std::thread;

use spec_docs::ui::{Redoc, SwaggerUi, Ui};
use spec_docs::{Config, Endpoint, Error, SpecDocs, CONFIG_FILE_ENV, HTML_CONTENT_TYPE};

mod common;

use common::{fixture, fixture_bytes};

fn json_docs() -> SpecDocs {
    SpecDocs::new(
        Config::new()
            .base_path("/api")
            .file_path(fixture("openapi.json"))
            .spec_path("openapi.json"),
    )
    .expect("json fixture should load")
}

#[test]
fn spec_url_is_derived_from_relative_file_path() {
    let docs = SpecDocs::new(Config::new().file_path("./tests/fixtures/openapi.json"))
        .expect("json fixture should load");

    assert_eq!(docs.spec_url(), "/tests/fixtures/openapi.json");
    assert_eq!(docs.ui_url(), "/docs");
    assert_eq!(docs.title(), "Fiber API documentation");
}

#[test]
fn urls_are_joined_under_base_path() {
    let docs = SpecDocs::new(
        Config::new()
            .base_path("/api/")
            .path("/docs/")
            .file_path("tests/fixtures/openapi.yaml"),
    )
    .expect("yaml fixture should load");

    assert_eq!(docs.ui_url(), "/api/docs");
    assert_eq!(docs.spec_url(), "/api/tests/fixtures/openapi.yaml");
}

#[test]
fn spec_is_served_byte_for_byte() {
    let docs = json_docs();

    let file = docs.serve(Endpoint::Spec);

    assert_eq!(file.bytes.as_ref(), fixture_bytes("openapi.json").as_slice());
    assert_eq!(file.content_type, "application/json");
}

#[test]
fn yaml_spec_is_served_as_yaml() {
    let docs = SpecDocs::new(Config::new().file_path(fixture("openapi.yaml")).spec_path("openapi.yaml"))
        .expect("yaml fixture should load");

    assert_eq!(docs.spec_url(), "/openapi.yaml");
    assert_eq!(docs.serve(Endpoint::Spec).content_type, "application/yaml");
    assert_eq!(docs.spec().as_ref(), fixture_bytes("openapi.yaml").as_slice());
}

#[test]
fn ui_is_rendered_with_spec_url_and_title() {
    let docs = SpecDocs::new(
        Config::new()
            .base_path("/api")
            .file_path(fixture("openapi.json"))
            .spec_path("openapi.json")
            .title("Pet store"),
    )
    .expect("json fixture should load");

    let file = docs.serve(Endpoint::Ui);
    let html = std::str::from_utf8(&file.bytes).expect("html should be utf-8");

    assert_eq!(file.content_type, HTML_CONTENT_TYPE);
    assert!(html.contains(r#"url: "/api/openapi.json","#), "{html}");
    assert!(html.contains("<title>Pet store</title>"), "{html}");
}

#[test]
fn ui_is_selected_from_config() {
    let docs = SpecDocs::new(
        Config::new()
            .file_path(fixture("openapi.json"))
            .spec_path("openapi.json")
            .ui(Redoc::new()),
    )
    .expect("json fixture should load");

    let html = std::str::from_utf8(docs.html()).expect("html should be utf-8");

    assert!(html.contains(r#"<redoc spec-url="/openapi.json"></redoc>"#), "{html}");
}

#[test]
fn ui_is_rendered_with_custom_renderer() {
    let docs = SpecDocs::with_renderer(
        Config::new()
            .file_path(fixture("openapi.json"))
            .spec_path("openapi.json")
            .title("Pets"),
        |spec_url: &str, title: &str| format!("{title} at {spec_url}"),
    )
    .expect("json fixture should load");

    assert_eq!(docs.html().as_ref(), b"Pets at /openapi.json");
}

#[test]
fn route_matches_exact_paths_only() {
    let docs = json_docs();

    assert_eq!(docs.route("/api/openapi.json"), Some(Endpoint::Spec));
    assert_eq!(docs.route("/api/docs"), Some(Endpoint::Ui));

    for path in [
        "/v2/api/docs",
        "/docs",
        "/api/docs/",
        "/api/docs/index.html",
        "/api",
        "/API/docs",
        "/v1/api/openapi.json",
        "",
    ] {
        assert_eq!(docs.route(path), None, "{path} should pass through");
    }
}

#[test]
fn missing_spec_file_fails_construction() {
    let error = SpecDocs::new(Config::new().file_path(fixture("missing.json"))).unwrap_err();

    assert!(matches!(error, Error::SpecNotFound { .. }), "{error}");
    assert!(error.to_string().contains("missing.json"));
}

#[test]
fn unreadable_spec_file_fails_construction() {
    let error = SpecDocs::new(Config::new().file_path(fixture(""))).unwrap_err();

    assert!(matches!(error, Error::ReadSpec { .. }), "{error}");
}

#[test]
fn invalid_base_path_fails_construction() {
    let error = SpecDocs::new(
        Config::new()
            .base_path("/api?version=1")
            .file_path(fixture("openapi.json")),
    )
    .unwrap_err();

    assert!(matches!(error, Error::InvalidPath { .. }), "{error}");
}

#[test]
fn conflicting_urls_fail_construction() {
    let error = SpecDocs::new(
        Config::new()
            .base_path("/api")
            .path("docs")
            .spec_path("./docs")
            .file_path(fixture("openapi.json")),
    )
    .unwrap_err();

    assert!(
        matches!(&error, Error::ConflictingPaths(url) if url == "/api/docs"),
        "{error}"
    );
}

#[test]
fn config_loaded_from_file() {
    let config = Config::from_file(fixture("spec-docs.json")).expect("config should load");
    let docs = SpecDocs::new(config.spec_path("openapi.yaml")).expect("yaml fixture should load");

    assert_eq!(docs.spec_url(), "/api/v1/openapi.yaml");
    assert_eq!(docs.ui_url(), "/api/v1/reference");
    assert_eq!(docs.title(), "Pet store reference");

    let html = std::str::from_utf8(docs.html()).expect("html should be utf-8");
    assert!(html.contains(r#"<script src="/assets/redoc.standalone.js"></script>"#));
}

#[test]
fn invalid_config_file_fails_to_parse() {
    let error = Config::from_file(fixture("invalid-config.json")).unwrap_err();

    assert!(matches!(error, Error::ConfigParse { .. }), "{error}");
}

#[test]
fn config_loaded_from_env() {
    std::env::remove_var(CONFIG_FILE_ENV);
    assert!(matches!(
        Config::from_env(),
        Err(Error::MissingConfigEnv(CONFIG_FILE_ENV))
    ));

    std::env::set_var(CONFIG_FILE_ENV, fixture("spec-docs.json"));
    let config = Config::from_env().expect("config should load");
    std::env::remove_var(CONFIG_FILE_ENV);

    assert_eq!(config.base_path, "/api/v1");
    assert_eq!(
        config.ui,
        Ui::from(Redoc::new().script_url("/assets/redoc.standalone.js"))
    );
}

#[test]
fn docs_are_shared_between_threads() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<SpecDocs>();

    let docs = SpecDocs::new(
        Config::new()
            .file_path(fixture("openapi.json"))
            .spec_path("openapi.json")
            .ui(SwaggerUi::new()),
    )
    .expect("json fixture should load");
    let expected = fixture_bytes("openapi.json");

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    let endpoint = docs.route("/openapi.json").expect("spec url should route");
                    assert_eq!(docs.serve(endpoint).bytes.as_ref(), expected.as_slice());
                }
            });
        }
    });
}
