//! HTTP exposure of the dashboard actions and queries
//!
//! A thin axum layer: handlers delegate to [`DashboardQueries`] and
//! [`InvoiceActions`], errors map to HTTP through
//! [`crate::core::error::Error::into_response`], and the ordered effect
//! list of a mutation is translated here (revalidation is acknowledged
//! and logged, a redirect becomes HTTP 303).

use crate::actions::{Effect, InvoiceActions, authenticate};
use crate::config::DashboardConfig;
use crate::core::error::Error;
use crate::core::forms::{InvoiceFormData, SignInFormData};
use crate::core::pagination::ListParams;
use crate::core::store::{Authenticator, DashboardStore};
use crate::model::Revenue;
use crate::queries::{
    CardData, CustomerField, CustomerSummary, DashboardQueries, InvoiceForm, InvoiceRow,
    LatestInvoice,
};
use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub queries: DashboardQueries,
    pub actions: InvoiceActions,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DashboardStore>,
        authenticator: Arc<dyn Authenticator>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            queries: DashboardQueries::new(store.clone(), config.clone()),
            actions: InvoiceActions::new(store, config),
            authenticator,
        }
    }
}

/// Build the dashboard router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/revenue", get(get_revenue))
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route("/invoices/latest", get(latest_invoices))
        .route("/invoices/cards", get(card_data))
        .route("/invoices/pages", get(invoices_pages))
        .route(
            "/invoices/{id}",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
        .route("/customers", get(list_customers))
        .route("/customers/table", get(customers_table))
        .route("/login", axum::routing::post(login))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize tracing with an env-filter (RUST_LOG), defaulting to `info`
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Bind and serve the router until the task is cancelled
pub async fn serve(router: Router, addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Dashboard API listening on {}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

// =============================================================================
// Query handlers
// =============================================================================

async fn get_revenue(State(state): State<AppState>) -> Result<Json<Vec<Revenue>>, Error> {
    Ok(Json(state.queries.revenue().await?))
}

async fn latest_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<LatestInvoice>>, Error> {
    Ok(Json(state.queries.latest_invoices().await?))
}

async fn card_data(State(state): State<AppState>) -> Result<Json<CardData>, Error> {
    Ok(Json(state.queries.card_data().await?))
}

async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<InvoiceRow>>, Error> {
    let rows = state
        .queries
        .filtered_invoices(&params.query, params.page())
        .await?;
    Ok(Json(rows))
}

async fn invoices_pages(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<usize>, Error> {
    Ok(Json(state.queries.invoices_pages(&params.query).await?))
}

async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceForm>, Error> {
    Ok(Json(state.queries.invoice_by_id(id).await?))
}

async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerField>>, Error> {
    Ok(Json(state.queries.customers().await?))
}

async fn customers_table(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CustomerSummary>>, Error> {
    Ok(Json(state.queries.filtered_customers(&params.query).await?))
}

// =============================================================================
// Mutation handlers
// =============================================================================

async fn create_invoice(
    State(state): State<AppState>,
    Form(form): Form<InvoiceFormData>,
) -> Result<Response, Error> {
    let effects = state.actions.create_invoice(&form).await?;
    Ok(effects_response(effects))
}

async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<InvoiceFormData>,
) -> Result<Response, Error> {
    let effects = state.actions.update_invoice(id, &form).await?;
    Ok(effects_response(effects))
}

async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, Error> {
    let effects = state.actions.delete_invoice(id).await?;
    Ok(effects_response(effects))
}

async fn login(
    State(state): State<AppState>,
    Form(form): Form<SignInFormData>,
) -> Result<Response, Error> {
    match authenticate(state.authenticator.as_ref(), &form).await? {
        None => Ok(StatusCode::NO_CONTENT.into_response()),
        Some(message) => Ok((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": message })),
        )
            .into_response()),
    }
}

/// Translate an ordered effect list into an HTTP response
///
/// Effects are applied in order: revalidation is logged (the HTTP layer
/// has no render cache of its own), then any redirect becomes a 303 so
/// the browser re-fetches the listing with GET.
fn effects_response(effects: Vec<Effect>) -> Response {
    let mut redirect = None;
    for effect in effects {
        match effect {
            Effect::RevalidatePath(path) => {
                tracing::debug!(path = %path, "revalidating cached view");
            }
            Effect::Redirect(path) => redirect = Some(path),
        }
    }

    match redirect {
        Some(path) => Redirect::to(&path).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
