//! HTTP route handlers.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};

use crate::planner::{RouteError, plan_route};
use crate::stats;

use super::dto::{AddPerturbationForm, AppError, ItineraryForm, RemovePerturbationForm};
use super::state::AppState;
use super::templates::{
    CityTemplate, IndexTemplate, ItineraryTemplate, PerturbationView, StatRow,
    StatisticsTemplate, format_duration, itinerary_steps,
};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/city/:city", get(city_page))
        .route("/city/:city/itinerary", post(plan_itinerary))
        .route("/city/:city/perturbations", post(add_perturbation))
        .route("/city/:city/perturbations/remove", post(remove_perturbation))
        .route("/city/:city/statistics", get(statistics_page))
        .with_state(state)
}

fn render<T: Template>(template: T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Home page listing the configured cities.
async fn index_page(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cities = state
        .registry
        .cities()
        .into_iter()
        .map(str::to_string)
        .collect();
    render(IndexTemplate { cities })
}

/// City page with the itinerary form and the active perturbations.
async fn city_page(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let perturbations = state
        .registry
        .active_perturbations(&city)?
        .iter()
        .map(PerturbationView::from_active)
        .collect();
    render(CityTemplate {
        city,
        perturbations,
    })
}

/// Plan an itinerary on the live graph.
async fn plan_itinerary(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Form(form): Form<ItineraryForm>,
) -> Result<impl IntoResponse, AppError> {
    let preference = form.preference()?;
    let graph = state.registry.graph(&city)?;
    let matrix = state.registry.line_matrix(&city)?;

    let start = form.start.trim();
    let end = form.end.trim();
    tracing::debug!(city, start, end, ?preference, "planning itinerary");

    let template = match plan_route(&graph, &matrix, start, end, preference) {
        Ok(itinerary) => ItineraryTemplate {
            city,
            start: start.to_string(),
            end: end.to_string(),
            error: None,
            time: format_duration(itinerary.total_time),
            interchanges: itinerary.interchanges,
            steps: itinerary_steps(&itinerary),
        },
        Err(err @ (RouteError::UnknownStation(_) | RouteError::NoPath { .. })) => {
            ItineraryTemplate {
                city,
                start: start.to_string(),
                end: end.to_string(),
                error: Some(err.to_string()),
                time: String::new(),
                interchanges: 0,
                steps: Vec::new(),
            }
        }
    };
    render(template)
}

/// Activate a perturbation, then return to the city page.
async fn add_perturbation(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Form(form): Form<AddPerturbationForm>,
) -> Result<Redirect, AppError> {
    let (name, perturbation) = form.into_perturbation()?;
    state.registry.add_perturbation(&city, &name, perturbation)?;
    Ok(Redirect::to(&format!("/city/{city}")))
}

/// Revert a perturbation, then return to the city page.
async fn remove_perturbation(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Form(form): Form<RemovePerturbationForm>,
) -> Result<Redirect, AppError> {
    state.registry.revert_perturbation(&city, &form.name)?;
    Ok(Redirect::to(&format!("/city/{city}")))
}

/// Statistics over the pristine network.
async fn statistics_page(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let graph = state.registry.initial_graph(&city)?;
    let matrix = state.registry.initial_line_matrix(&city)?;

    let mut rows = Vec::new();

    if let Some(pair) = stats::most_distant_stations(&graph, |_| true, |_| true) {
        rows.push(StatRow {
            label: "Most distant stations".into(),
            value: format!(
                "{} to {} ({})",
                pair.from.name(),
                pair.to.name(),
                format_duration(pair.time)
            ),
        });
        let correspondence = stats::minimum_correspondence(
            &graph,
            &matrix,
            |s| s.name() == pair.from.name(),
            |s| s.name() == pair.to.name(),
        );
        if let Some(count) = correspondence {
            rows.push(StatRow {
                label: "Line changes between them".into(),
                value: count.to_string(),
            });
        }
    }

    if let Some((line, count)) = stats::extremum_line(&graph, true) {
        rows.push(StatRow {
            label: "Longest line".into(),
            value: format!("line {line} ({count} stations)"),
        });
    }
    if let Some((line, count)) = stats::extremum_line(&graph, false) {
        rows.push(StatRow {
            label: "Shortest line".into(),
            value: format!("line {line} ({count} stations)"),
        });
    }
    if let Some(average) = stats::average_stations_per_line(&graph) {
        rows.push(StatRow {
            label: "Average stations per line".into(),
            value: format!("{average:.1}"),
        });
    }

    let mut averages: Vec<(String, f64)> =
        stats::average_time_per_line(&graph).into_iter().collect();
    averages.sort_by(|a, b| a.0.cmp(&b.0));
    if !averages.is_empty() {
        let value = averages
            .iter()
            .map(|(line, avg)| format!("line {line}: {}", format_duration(*avg)))
            .collect::<Vec<_>>()
            .join(", ");
        rows.push(StatRow {
            label: "Average time between stations".into(),
            value,
        });
    }

    if let Some((line, time)) = stats::extremum_travel_time_line(&graph, true) {
        rows.push(StatRow {
            label: "Longest end-to-end ride".into(),
            value: format!("line {line} ({})", format_duration(time)),
        });
    }
    if let Some((line, time)) = stats::extremum_travel_time_line(&graph, false) {
        rows.push(StatRow {
            label: "Shortest end-to-end ride".into(),
            value: format!("line {line} ({})", format_duration(time)),
        });
    }

    render(StatisticsTemplate { city, rows })
}
