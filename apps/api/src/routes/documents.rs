use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::relayout::{LayoutPatch, FIRST_PASS};
use crate::layout::{DocumentSession, FontFamily, LayoutError, LayoutInputs, PageSet, Paginator};
use crate::models::ResumeData;
use crate::render::html::render_print_html;
use crate::state::AppState;
use crate::templates::TemplateKind;

/// Layout inputs as sent by the editor. Missing fields keep their current value
/// (for a new document, the configured defaults).
#[derive(Debug, Default, Deserialize)]
pub struct LayoutRequest {
    pub data: Option<ResumeData>,
    pub template: Option<String>,
    pub font_family: Option<String>,
    pub font_size_pt: Option<f32>,
}

impl LayoutRequest {
    /// Parses the template and font names.
    pub fn into_patch(self) -> Result<LayoutPatch, LayoutError> {
        Ok(LayoutPatch {
            data: self.data,
            template: self.template.map(|name| name.parse::<TemplateKind>()).transpose()?,
            font_family: self.font_family.map(|name| name.parse::<FontFamily>()).transpose()?,
            font_size_pt: self.font_size_pt,
        })
    }

    /// Validates the style knobs and fills the gaps from `base`.
    pub fn resolve(self, base: &LayoutInputs) -> Result<LayoutInputs, LayoutError> {
        self.into_patch()?.apply(base)
    }
}

#[derive(Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub inputs: LayoutInputs,
    pub pages: Arc<PageSet>,
}

#[derive(Serialize)]
pub struct RelayoutResponse {
    pub id: Uuid,
    /// `committed`, `unchanged` or `superseded`.
    pub outcome: &'static str,
    /// Ticket this request was given.
    pub requested_pass: u64,
    /// Inputs the request resolved to after merging with earlier edits.
    pub requested_inputs: LayoutInputs,
    pub pages: Arc<PageSet>,
}

fn join_failed(e: tokio::task::JoinError) -> AppError {
    AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout pass: {e}"))
}

/// POST /api/v1/paginate
/// Stateless: lays the inputs out once and returns the pages.
pub async fn handle_paginate(
    State(state): State<AppState>,
    Json(req): Json<LayoutRequest>,
) -> Result<Json<PageSet>, AppError> {
    let inputs = req.resolve(&state.config.default_inputs())?;
    let geometry = state.config.geometry();

    // CPU-bound pass: spawn_blocking keeps the async executor free.
    let pages = tokio::task::spawn_blocking(move || {
        Paginator::with_metrics(geometry).run_pass(&inputs, FIRST_PASS)
    })
    .await
    .map_err(join_failed)??;

    Ok(Json(pages))
}

/// POST /api/v1/documents
pub async fn handle_open_document(
    State(state): State<AppState>,
    Json(req): Json<LayoutRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), AppError> {
    let inputs = req.resolve(&state.config.default_inputs())?;
    let geometry = state.config.geometry();

    let session = tokio::task::spawn_blocking(move || {
        DocumentSession::open(Uuid::new_v4(), inputs, Paginator::with_metrics(geometry))
    })
    .await
    .map_err(join_failed)??;

    let session = state.documents.insert(session)?;
    let (inputs, pages) = session.snapshot()?;
    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse {
            id: session.id(),
            inputs,
            pages,
        }),
    ))
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, AppError> {
    let session = state.documents.get(id)?;
    let (inputs, pages) = session.snapshot()?;
    Ok(Json(DocumentResponse { id, inputs, pages }))
}

/// PUT /api/v1/documents/:id/layout
/// Relayout trigger: any change to data, template, font or size reruns the pass.
pub async fn handle_relayout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<LayoutRequest>,
) -> Result<Json<RelayoutResponse>, AppError> {
    let session = state.documents.get(id)?;
    let patch = req.into_patch()?;

    // The ticket is taken before the pass is queued so request order decides
    // which pass may commit. The patch is merged in the same step.
    let ticket = session.begin_pass(patch)?;
    let requested_pass = ticket.number();
    let requested_inputs = ticket.inputs().clone();
    let outcome = tokio::task::spawn_blocking(move || session.relayout(ticket))
        .await
        .map_err(join_failed)??;

    Ok(Json(RelayoutResponse {
        id,
        outcome: outcome.kind(),
        requested_pass,
        requested_inputs,
        pages: Arc::clone(outcome.pages()),
    }))
}

/// GET /api/v1/documents/:id/print
pub async fn handle_print(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let pages = state.documents.get(id)?.current()?;
    Ok(Html(render_print_html(&pages)))
}

/// DELETE /api/v1/documents/:id
pub async fn handle_close_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.documents.remove(id)?;
    tracing::info!(document = %id, "document session closed");
    Ok(StatusCode::NO_CONTENT)
}
