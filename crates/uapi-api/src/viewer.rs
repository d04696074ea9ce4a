//! # Documentation Viewer
//!
//! An HTML page that loads the Swagger UI bundle from a CDN and points it at
//! `/openapi.json`. No assets are bundled into the binary.

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;

const SWAGGER_UI_VERSION: &str = "5.17.14";

/// GET /api-docs: Swagger UI for the served document.
pub async fn api_docs(State(state): State<AppState>) -> Html<String> {
    Html(render(&state.config.api_title, "/openapi.json"))
}

fn render(title: &str, document_url: &str) -> String {
    let title = escape(title);
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{SWAGGER_UI_VERSION}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@{SWAGGER_UI_VERSION}/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{document_url}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
