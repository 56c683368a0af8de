//! Static dashboard data and suggested queries

use crate::core::mock::{self, Dashboard, SUGGESTED_QUERIES};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

pub fn router() -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/suggestions", get(suggestions))
}

#[derive(Serialize, Debug)]
pub struct Suggestions {
    pub queries: Vec<&'static str>,
}

async fn dashboard() -> Json<Dashboard> {
    Json(mock::dashboard())
}

/// Example questions a client can drop into its input field.
async fn suggestions() -> Json<Suggestions> {
    Json(Suggestions {
        queries: SUGGESTED_QUERIES.to_vec(),
    })
}
