//! Askama templates and their view models.

use askama::Template;

use crate::planner::Itinerary;
use crate::traffic::ActivePerturbation;

/// Home page listing the configured cities.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub cities: Vec<String>,
}

/// City page: itinerary form, active perturbations, perturbation form.
#[derive(Template)]
#[template(path = "city.html")]
pub struct CityTemplate {
    pub city: String,
    pub perturbations: Vec<PerturbationView>,
}

/// Itinerary result page.
///
/// `error` carries the "no path" / "unknown station" outcome; when it is
/// `None` the time and steps describe a found route.
#[derive(Template)]
#[template(path = "itinerary.html")]
pub struct ItineraryTemplate {
    pub city: String,
    pub start: String,
    pub end: String,
    pub error: Option<String>,
    pub time: String,
    pub interchanges: usize,
    pub steps: Vec<String>,
}

/// Statistics page.
#[derive(Template)]
#[template(path = "statistics.html")]
pub struct StatisticsTemplate {
    pub city: String,
    pub rows: Vec<StatRow>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

/// One labelled statistics value.
#[derive(Debug, Clone)]
pub struct StatRow {
    pub label: String,
    pub value: String,
}

/// Active perturbation view model.
#[derive(Debug, Clone)]
pub struct PerturbationView {
    pub name: String,
    pub description: String,
}

impl PerturbationView {
    pub fn from_active(active: &ActivePerturbation) -> Self {
        Self {
            name: active.name.clone(),
            description: active.perturbation.to_string(),
        }
    }
}

/// Render a travel time in seconds for display.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.round() as i64;
    let minutes = total / 60;
    let rest = total % 60;
    if minutes > 0 {
        format!("{minutes} min {rest} s")
    } else {
        format!("{rest} s")
    }
}

/// Human-readable steps, origin first.
pub fn itinerary_steps(itinerary: &Itinerary) -> Vec<String> {
    itinerary
        .steps
        .iter()
        .rev()
        .map(|step| match &step.line {
            Some(line) => format!("At {} take line {}", step.station, line),
            None => format!("Arrive at {}", step.station),
        })
        .collect()
}
