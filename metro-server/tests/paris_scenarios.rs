//! End-to-end scenarios on the Paris network extract.

use std::collections::HashMap;

use metro_server::domain::Station;
use metro_server::network::NetworkPlan;
use metro_server::planner::{RouteError, RoutePreference, RouteStep, plan_route};
use metro_server::stats;
use metro_server::traffic::{Perturbation, TrafficRegistry};

const PARIS: &str = include_str!("fixtures/paris.plan");

fn registry() -> TrafficRegistry {
    let graph = NetworkPlan::parse(PARIS)
        .expect("fixture plan parses")
        .build_graph();
    TrafficRegistry::new(HashMap::from([("paris".to_string(), graph)]))
}

fn plan(
    reg: &TrafficRegistry,
    start: &str,
    end: &str,
    preference: RoutePreference,
) -> Result<metro_server::planner::Itinerary, RouteError> {
    let graph = reg.graph("paris").unwrap();
    let matrix = reg.line_matrix("paris").unwrap();
    plan_route(&graph, &matrix, start, end, preference)
}

#[test]
fn porte_des_lilas_to_temple_with_fewest_changes() {
    let reg = registry();
    let it = plan(
        &reg,
        "Porte des Lilas",
        "Temple",
        RoutePreference::LeastConnexion,
    )
    .unwrap();

    assert_eq!(
        it.steps,
        vec![
            RouteStep::terminal("Temple"),
            RouteStep::ride("République", "3"),
            RouteStep::ride("Porte des Lilas", "11"),
        ]
    );
    assert_eq!(it.interchanges, 1);
    // 7 segments on line 11, then 1 on line 3.
    assert_eq!(it.total_time, 8.0 * 90.0);
}

#[test]
fn robespierre_to_marx_dormoy_with_fewest_changes() {
    let reg = registry();
    let it = plan(
        &reg,
        "Robespierre",
        "Marx Dormoy",
        RoutePreference::LeastConnexion,
    )
    .unwrap();

    assert_eq!(
        it.steps,
        vec![
            RouteStep::terminal("Marx Dormoy"),
            RouteStep::ride("Marcadet - Poissonniers", "12"),
            RouteStep::ride("Strasbourg - Saint-Denis", "4"),
            RouteStep::ride("Robespierre", "9"),
        ]
    );
    assert_eq!(it.interchanges, 2);
    // 11 + 6 + 1 segments.
    assert_eq!(it.total_time, 18.0 * 90.0);
}

#[test]
fn fastest_route_lists_every_station() {
    let reg = registry();
    let it = plan(&reg, "Porte des Lilas", "Temple", RoutePreference::Shortest).unwrap();

    // 7 segments on line 11, one interchange, 1 segment on line 3.
    assert_eq!(it.total_time, 7.0 * 90.0 + 60.0 + 90.0);
    assert_eq!(it.interchanges, 1);
    assert_eq!(it.steps.len(), 9);
    assert_eq!(it.steps[0], RouteStep::terminal("Temple"));
    assert_eq!(it.steps[1], RouteStep::ride("République", "3"));
    assert_eq!(it.steps[8], RouteStep::ride("Porte des Lilas", "11"));
    assert_eq!(it.steps[7], RouteStep::ride("Télégraphe", "11"));
}

#[test]
fn line_shutdown_cuts_its_own_edges_and_reroutes_or_fails() {
    let reg = registry();
    reg.add_perturbation(
        "paris",
        "strike on 3",
        Perturbation::LineShutdown { line: "3".into() },
    )
    .unwrap();

    let live = reg.graph("paris").unwrap();
    assert_eq!(
        live.weight(
            &Station::new("Arts et Métiers", "3"),
            &Station::new("Temple", "3")
        ),
        None
    );
    // Temple is only served by line 3: no route remains at any budget.
    for pref in [RoutePreference::Shortest, RoutePreference::LeastConnexion] {
        assert_eq!(
            plan(&reg, "Porte des Lilas", "Temple", pref),
            Err(RouteError::NoPath {
                from: "Porte des Lilas".into(),
                to: "Temple".into(),
            })
        );
    }
}

#[test]
fn reverting_the_only_perturbation_restores_the_pristine_network() {
    let reg = registry();
    reg.add_perturbation(
        "paris",
        "strike on 3",
        Perturbation::LineShutdown { line: "3".into() },
    )
    .unwrap();
    reg.revert_perturbation("paris", "strike on 3").unwrap();

    let live = reg.graph("paris").unwrap();
    let pristine = reg.initial_graph("paris").unwrap();
    assert_eq!(*live, *pristine);

    let it = plan(
        &reg,
        "Porte des Lilas",
        "Temple",
        RoutePreference::LeastConnexion,
    )
    .unwrap();
    assert_eq!(it.steps[1], RouteStep::ride("République", "3"));
}

#[test]
fn partial_station_shutdown_moves_the_interchange() {
    let reg = registry();
    // Close République on line 3 only: the 11 -> 3 change must happen at
    // Arts et Métiers instead.
    reg.add_perturbation(
        "paris",
        "works at République",
        Perturbation::PartialStationShutdown {
            station: Station::new("République", "3"),
        },
    )
    .unwrap();

    let it = plan(
        &reg,
        "Porte des Lilas",
        "Temple",
        RoutePreference::LeastConnexion,
    )
    .unwrap();
    assert_eq!(
        it.steps,
        vec![
            RouteStep::terminal("Temple"),
            RouteStep::ride("Arts et Métiers", "3"),
            RouteStep::ride("Porte des Lilas", "11"),
        ]
    );
}

#[test]
fn full_station_shutdown_disconnects_dependent_routes() {
    let reg = registry();
    reg.add_perturbation(
        "paris",
        "closed",
        Perturbation::StationShutdown {
            station: "Marcadet - Poissonniers".into(),
        },
    )
    .unwrap();

    assert_eq!(
        plan(
            &reg,
            "Robespierre",
            "Marx Dormoy",
            RoutePreference::LeastConnexion
        ),
        Err(RouteError::NoPath {
            from: "Robespierre".into(),
            to: "Marx Dormoy".into(),
        })
    );
}

#[test]
fn line_slowdown_scales_travel_times() {
    let reg = registry();
    reg.add_perturbation(
        "paris",
        "reduced speed",
        Perturbation::LineSlowdown {
            line: "11".into(),
            factor: 10.0,
        },
    )
    .unwrap();

    let it = plan(&reg, "Porte des Lilas", "Temple", RoutePreference::Shortest).unwrap();
    // The 7 line-11 segments now cost 900 each; interchange and the
    // line-3 segment are untouched.
    assert_eq!(it.total_time, 7.0 * 900.0 + 60.0 + 90.0);
}

#[test]
fn unknown_entities_short_circuit() {
    let reg = registry();
    assert_eq!(
        plan(&reg, "Atlantis", "Temple", RoutePreference::Shortest),
        Err(RouteError::UnknownStation("Atlantis".into()))
    );
    assert!(reg.graph("london").is_err());
}

#[test]
fn pristine_statistics() {
    let reg = registry();
    let graph = reg.initial_graph("paris").unwrap();
    let matrix = reg.initial_line_matrix("paris").unwrap();

    assert_eq!(stats::extremum_line(&graph, true), Some(("9".into(), 13)));
    assert_eq!(stats::extremum_line(&graph, false), Some(("12".into(), 7)));
    assert_eq!(stats::average_stations_per_line(&graph), Some(49.0 / 5.0));

    // Every segment costs the same, so every line averages to it.
    let averages = stats::average_time_per_line(&graph);
    assert!(averages.values().all(|&avg| avg == 90.0));

    // Line 9 has the most segments, line 12 the fewest.
    assert_eq!(
        stats::extremum_travel_time_line(&graph, true),
        Some(("9".into(), 12.0 * 90.0))
    );
    assert_eq!(
        stats::extremum_travel_time_line(&graph, false),
        Some(("12".into(), 6.0 * 90.0))
    );

    assert_eq!(
        stats::minimum_correspondence(
            &graph,
            &matrix,
            |s| s.name() == "Robespierre",
            |s| s.name() == "Marx Dormoy"
        ),
        Some(2)
    );
}
