//! Form payloads and the web error type.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::domain::Station;
use crate::planner::RoutePreference;
use crate::traffic::{Perturbation, TrafficError};

use super::templates::ErrorTemplate;

/// Itinerary request form.
#[derive(Debug, Deserialize)]
pub struct ItineraryForm {
    pub start: String,
    pub end: String,
    pub preference: String,
}

impl ItineraryForm {
    /// Parse the route-preference selector.
    pub fn preference(&self) -> Result<RoutePreference, AppError> {
        RoutePreference::parse(&self.preference).ok_or_else(|| {
            AppError::BadRequest(format!("unknown route preference: {}", self.preference))
        })
    }
}

/// Perturbation creation form.
///
/// Browsers submit every field, empty or not, so the kind-specific
/// parameters arrive as strings and are validated here.
#[derive(Debug, Deserialize)]
pub struct AddPerturbationForm {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub line: String,
    #[serde(default)]
    pub factor: String,
    #[serde(default)]
    pub station: String,
    #[serde(default)]
    pub station_line: String,
}

impl AddPerturbationForm {
    /// Validate the form into a perturbation name and record.
    pub fn into_perturbation(self) -> Result<(String, Perturbation), AppError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("perturbation name is required".into()));
        }

        let perturbation = match self.kind.as_str() {
            "line_shutdown" => Perturbation::LineShutdown {
                line: require("line", &self.line)?,
            },
            "line_slowdown" => {
                let line = require("line", &self.line)?;
                let factor: f64 = require("factor", &self.factor)?
                    .parse()
                    .map_err(|_| AppError::BadRequest("factor must be a number".into()))?;
                if factor <= 0.0 {
                    return Err(AppError::BadRequest("factor must be positive".into()));
                }
                Perturbation::LineSlowdown { line, factor }
            }
            "station_shutdown" => Perturbation::StationShutdown {
                station: require("station", &self.station)?,
            },
            "partial_station_shutdown" => {
                let station = require("station", &self.station)?;
                let line = require("station line", &self.station_line)?;
                Perturbation::PartialStationShutdown {
                    station: Station::new(station, line),
                }
            }
            other => {
                return Err(AppError::BadRequest(format!(
                    "unknown perturbation kind: {other}"
                )));
            }
        };

        Ok((name, perturbation))
    }
}

fn require(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(value.to_string())
}

/// Perturbation removal form.
#[derive(Debug, Deserialize)]
pub struct RemovePerturbationForm {
    pub name: String,
}

/// Errors a handler can surface to the browser.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

impl From<TrafficError> for AppError {
    fn from(err: TrafficError) -> Self {
        match err {
            TrafficError::UnknownCity(city) => AppError::UnknownCity(city),
            TrafficError::DuplicatePerturbation { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title) = match &self {
            AppError::UnknownCity(_) => (StatusCode::NOT_FOUND, "Not found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request"),
            AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error"),
        };
        let body = ErrorTemplate {
            title: title.to_string(),
            message: self.to_string(),
        }
        .render()
        .unwrap_or_else(|e| format!("Template error: {e}"));
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(kind: &str) -> AddPerturbationForm {
        AddPerturbationForm {
            name: "works".into(),
            kind: kind.into(),
            line: String::new(),
            factor: String::new(),
            station: String::new(),
            station_line: String::new(),
        }
    }

    #[test]
    fn line_shutdown_form() {
        let mut f = form("line_shutdown");
        f.line = "3".into();
        let (name, p) = f.into_perturbation().unwrap();
        assert_eq!(name, "works");
        assert_eq!(p, Perturbation::LineShutdown { line: "3".into() });
    }

    #[test]
    fn line_slowdown_form_parses_factor() {
        let mut f = form("line_slowdown");
        f.line = "3".into();
        f.factor = "2.5".into();
        let (_, p) = f.into_perturbation().unwrap();
        assert_eq!(
            p,
            Perturbation::LineSlowdown {
                line: "3".into(),
                factor: 2.5
            }
        );
    }

    #[test]
    fn partial_station_shutdown_form() {
        let mut f = form("partial_station_shutdown");
        f.station = "Temple".into();
        f.station_line = "3".into();
        let (_, p) = f.into_perturbation().unwrap();
        assert_eq!(
            p,
            Perturbation::PartialStationShutdown {
                station: Station::new("Temple", "3")
            }
        );
    }

    #[test]
    fn missing_parameters_are_rejected() {
        assert!(form("line_shutdown").into_perturbation().is_err());
        assert!(form("station_shutdown").into_perturbation().is_err());

        let mut f = form("line_slowdown");
        f.line = "3".into();
        f.factor = "fast".into();
        assert!(f.into_perturbation().is_err());

        let mut f = form("line_slowdown");
        f.line = "3".into();
        f.factor = "-1".into();
        assert!(f.into_perturbation().is_err());
    }

    #[test]
    fn unknown_kind_and_empty_name_are_rejected() {
        assert!(form("teleportation").into_perturbation().is_err());

        let mut f = form("line_shutdown");
        f.line = "3".into();
        f.name = "  ".into();
        assert!(f.into_perturbation().is_err());
    }

    #[test]
    fn preference_validation() {
        let f = ItineraryForm {
            start: "a".into(),
            end: "b".into(),
            preference: "shortest".into(),
        };
        assert_eq!(f.preference().unwrap(), RoutePreference::Shortest);

        let f = ItineraryForm {
            start: "a".into(),
            end: "b".into(),
            preference: "scenic".into(),
        };
        assert!(f.preference().is_err());
    }
}
