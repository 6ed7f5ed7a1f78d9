// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::AppState;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let path = html_escape::encode_double_quoted_attribute(&state.config.web.telemetry_path);
    Html(format!(
        "<html>\n\
         <head><title>Netgear Exporter</title></head>\n\
         <body>\n\
         <h1>Netgear Exporter</h1>\n\
         <p><a href=\"{path}\">Metrics</a></p>\n\
         <p><a href=\"/health\">Health</a></p>\n\
         </body>\n\
         </html>\n"
    ))
}
