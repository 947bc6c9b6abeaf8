//! Page handlers.
//!
//! Handlers hold no state of their own: each one runs a store operation,
//! then either renders a view or redirects back to `/play`. Write routes
//! always redirect so a refresh never resubmits.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{AppError, StoreError};
use crate::flash::{Flash, Session};
use crate::helpers::{redirect_to_play, run_blocking};
use crate::state::AppState;
use crate::views::{self, SimContext, SimPage};

pub const MSG_NAME_TAKEN: &str =
    "This simulation name already exists. Please choose a different name.";
pub const MSG_NAME_INVALID: &str =
    "Simulation names may only contain letters, digits, dashes and underscores.";
pub const MSG_CREATED: &str = "Simulation created successfully!";
pub const MSG_DELETED: &str = "Simulation deleted successfully!";
pub const ABOUT_TEXT: &str = "About Page - Coming Soon";

/// Form body of `POST /create_sim`
#[derive(Debug, Default, Deserialize)]
pub struct CreateSimForm {
    #[serde(default)]
    pub sim_name: Option<String>,
}

/// GET `/` - landing page.
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let flashes = state.flashes.take(session.id).await;
    (session.cookie(), Html(views::index_page(&flashes)))
}

/// GET `/play` - lists every simulation.
pub async fn play(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let store = state.store.clone();
    let simulations = run_blocking(move || store.list()).await??;
    let flashes = state.flashes.take(session.id).await;
    Ok((session.cookie(), Html(views::play_page(&simulations, &flashes))))
}

/// POST `/create_sim` - creates a simulation from the `sim_name` field.
///
/// A blank name is ignored without feedback. Conflicts and rejected names
/// come back as error flashes; only unexpected I/O failures become a 500.
pub async fn create_sim(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CreateSimForm>,
) -> Result<impl IntoResponse, AppError> {
    let name = form
        .sim_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    if !name.is_empty() {
        let store = state.store.clone();
        let requested = name.clone();
        let flash = match run_blocking(move || store.create(&requested)).await? {
            Ok(_) => Flash::success(MSG_CREATED),
            Err(StoreError::AlreadyExists(_)) => Flash::error(MSG_NAME_TAKEN),
            Err(StoreError::InvalidName(_)) => {
                warn!("Rejected simulation name {name:?}");
                Flash::error(MSG_NAME_INVALID)
            }
            Err(err) => return Err(err.into()),
        };
        state.flashes.push(session.id, flash).await;
    }

    Ok((session.cookie(), redirect_to_play()))
}

/// GET `/delete_sim/:sim_name` - removes a simulation and everything in it.
///
/// Flashes only when something was actually deleted.
pub async fn delete_sim(
    State(state): State<AppState>,
    session: Session,
    Path(sim_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = state.store.clone();
    let target = sim_name.clone();
    if run_blocking(move || store.delete(&target)).await?? {
        state
            .flashes
            .push(session.id, Flash::success(MSG_DELETED))
            .await;
    } else {
        info!("Delete of missing simulation {sim_name:?}");
    }

    Ok((session.cookie(), redirect_to_play()))
}

/// GET `/play_sim/:sim_name` - simulation home tab.
pub async fn sim_home(
    State(state): State<AppState>,
    session: Session,
    Path(sim_name): Path<String>,
) -> Result<Response, AppError> {
    render_sim_page(&state, session, sim_name, SimPage::Home).await
}

/// GET `/play_sim/:sim_name/simulate`
pub async fn sim_simulate(
    State(state): State<AppState>,
    session: Session,
    Path(sim_name): Path<String>,
) -> Result<Response, AppError> {
    render_sim_page(&state, session, sim_name, SimPage::Simulate).await
}

/// GET `/play_sim/:sim_name/news`
pub async fn sim_news(
    State(state): State<AppState>,
    session: Session,
    Path(sim_name): Path<String>,
) -> Result<Response, AppError> {
    render_sim_page(&state, session, sim_name, SimPage::News).await
}

/// GET `/play_sim/:sim_name/stats`
pub async fn sim_stats(
    State(state): State<AppState>,
    session: Session,
    Path(sim_name): Path<String>,
) -> Result<Response, AppError> {
    render_sim_page(&state, session, sim_name, SimPage::Stats).await
}

/// GET `/play_sim/:sim_name/rosters`
pub async fn sim_rosters(
    State(state): State<AppState>,
    session: Session,
    Path(sim_name): Path<String>,
) -> Result<Response, AppError> {
    render_sim_page(&state, session, sim_name, SimPage::Rosters).await
}

/// GET `/about`
pub async fn about() -> &'static str {
    ABOUT_TEXT
}

// Unknown simulations redirect without a flash; pending messages stay queued
// for the list page.
async fn render_sim_page(
    state: &AppState,
    session: Session,
    sim_name: String,
    page: SimPage,
) -> Result<Response, AppError> {
    let store = state.store.clone();
    let lookup = sim_name.clone();
    let current_date =
        run_blocking(move || store.exists(&lookup).then(|| store.date(&lookup))).await?;

    let Some(current_date) = current_date else {
        return Ok(redirect_to_play().into_response());
    };

    let flashes = state.flashes.take(session.id).await;
    let html = views::sim_page(
        SimContext {
            name: &sim_name,
            current_date: &current_date,
            active_page: page,
        },
        &flashes,
    );

    Ok((session.cookie(), Html(html)).into_response())
}
