// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` documentation module
//!
//! Serves the generated `OpenAPI` document and a `Swagger UI` page that renders it.

use axum::{Json, response::Html};
use utoipa::OpenApi;

use crate::docs::ApiDoc;

/// Route serving the `OpenAPI` document
pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";

const SWAGGER_UI_VERSION: &str = "5.17.14";

/// `OpenAPI` specification endpoint
///
/// The document version follows the crate version.
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    let mut doc = ApiDoc::openapi();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    Json(doc)
}

/// Swagger UI endpoint
pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Name Resolver API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{SWAGGER_UI_VERSION}/swagger-ui.css" />
</head>
<body style="margin: 0">
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{SWAGGER_UI_VERSION}/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {{
            SwaggerUIBundle({{ url: '{OPENAPI_JSON_PATH}', dom_id: '#swagger-ui', deepLinking: true }});
        }};
    </script>
</body>
</html>
"#
    ))
}
