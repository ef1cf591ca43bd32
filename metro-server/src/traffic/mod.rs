//! Live traffic state per city.
//!
//! Each city owns an immutable pristine network, loaded once, plus a log
//! of active perturbations keyed by user-supplied names. The live graph
//! is never patched incrementally: every add or revert replays the whole
//! active set over a fresh copy of the pristine graph, so the published
//! state always reflects exactly the current set with no ordering drift.
//!
//! Readers get `Arc` snapshots of the live graph and its line matrices;
//! writers swap the snapshots under a per-city lock. A reader therefore
//! sees the network entirely before or entirely after a perturbation
//! change, never mid-replay. Cities are independent.

mod perturbation;

pub use perturbation::Perturbation;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::Station;
use crate::graph::WeightedGraph;
use crate::planner::LineMatrix;

/// A named, currently-active perturbation.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePerturbation {
    pub name: String,
    pub perturbation: Perturbation,
}

/// Traffic errors surfaced to the request layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrafficError {
    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("a perturbation named {name:?} is already active in {city}")]
    DuplicatePerturbation { city: String, name: String },
}

/// Mutable per-city state, swapped wholesale on every change.
struct CityState {
    live: Arc<WeightedGraph<Station>>,
    matrix: Arc<LineMatrix>,
    active: Vec<ActivePerturbation>,
}

struct CityTraffic {
    pristine: Arc<WeightedGraph<Station>>,
    pristine_matrix: Arc<LineMatrix>,
    state: RwLock<CityState>,
}

impl CityTraffic {
    fn new(pristine: WeightedGraph<Station>) -> Self {
        let matrix = Arc::new(LineMatrix::build(&pristine));
        let pristine = Arc::new(pristine);
        Self {
            state: RwLock::new(CityState {
                live: Arc::clone(&pristine),
                matrix: Arc::clone(&matrix),
                active: Vec::new(),
            }),
            pristine,
            pristine_matrix: matrix,
        }
    }
}

/// Registry of per-city traffic state.
///
/// Owned by the composition root and shared by reference with the request
/// layer; there is no global instance.
pub struct TrafficRegistry {
    cities: HashMap<String, CityTraffic>,
}

impl TrafficRegistry {
    /// Build the registry from the pristine networks, one per city.
    pub fn new(networks: HashMap<String, WeightedGraph<Station>>) -> Self {
        let cities = networks
            .into_iter()
            .map(|(city, graph)| {
                tracing::info!(city = %city, stations = graph.len(), "registered city network");
                (city, CityTraffic::new(graph))
            })
            .collect();
        Self { cities }
    }

    /// Configured city names, sorted.
    pub fn cities(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn city(&self, city: &str) -> Result<&CityTraffic, TrafficError> {
        self.cities
            .get(city)
            .ok_or_else(|| TrafficError::UnknownCity(city.to_string()))
    }

    /// The live graph of a city: pristine with all active perturbations
    /// replayed.
    pub fn graph(&self, city: &str) -> Result<Arc<WeightedGraph<Station>>, TrafficError> {
        let traffic = self.city(city)?;
        let state = traffic.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(&state.live))
    }

    /// The line matrices of the live graph.
    pub fn line_matrix(&self, city: &str) -> Result<Arc<LineMatrix>, TrafficError> {
        let traffic = self.city(city)?;
        let state = traffic.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(&state.matrix))
    }

    /// The pristine, unperturbed graph of a city.
    pub fn initial_graph(&self, city: &str) -> Result<Arc<WeightedGraph<Station>>, TrafficError> {
        Ok(Arc::clone(&self.city(city)?.pristine))
    }

    /// The line matrices of the pristine graph.
    pub fn initial_line_matrix(&self, city: &str) -> Result<Arc<LineMatrix>, TrafficError> {
        Ok(Arc::clone(&self.city(city)?.pristine_matrix))
    }

    /// Currently-active perturbations of a city, in application order.
    pub fn active_perturbations(
        &self,
        city: &str,
    ) -> Result<Vec<ActivePerturbation>, TrafficError> {
        let traffic = self.city(city)?;
        let state = traffic.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.active.clone())
    }

    /// Activate a named perturbation and republish the live graph.
    ///
    /// Rejected without any state change when the name is already active
    /// for the city.
    pub fn add_perturbation(
        &self,
        city: &str,
        name: &str,
        perturbation: Perturbation,
    ) -> Result<(), TrafficError> {
        let traffic = self.city(city)?;
        let mut state = traffic
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if state.active.iter().any(|p| p.name == name) {
            return Err(TrafficError::DuplicatePerturbation {
                city: city.to_string(),
                name: name.to_string(),
            });
        }
        tracing::info!(city, name, %perturbation, "perturbation added");
        state.active.push(ActivePerturbation {
            name: name.to_string(),
            perturbation,
        });
        replay(traffic, &mut state);
        Ok(())
    }

    /// Deactivate a named perturbation and republish the live graph.
    ///
    /// Reverting a name that is not active is a successful no-op.
    pub fn revert_perturbation(&self, city: &str, name: &str) -> Result<(), TrafficError> {
        let traffic = self.city(city)?;
        let mut state = traffic
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = state.active.len();
        state.active.retain(|p| p.name != name);
        if state.active.len() == before {
            return Ok(());
        }
        tracing::info!(city, name, "perturbation reverted");
        replay(traffic, &mut state);
        Ok(())
    }
}

/// Recompute the live graph from the pristine one by replaying every
/// active perturbation in application order, then rebuild the matrices
/// and swap both snapshots in.
fn replay(traffic: &CityTraffic, state: &mut CityState) {
    if state.active.is_empty() {
        state.live = Arc::clone(&traffic.pristine);
        state.matrix = Arc::clone(&traffic.pristine_matrix);
        return;
    }
    let mut live = WeightedGraph::clone(&traffic.pristine);
    for active in &state.active {
        active.perturbation.apply_to(&mut live);
    }
    state.matrix = Arc::new(LineMatrix::build(&live));
    state.live = Arc::new(live);
}
