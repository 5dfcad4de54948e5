//! Behavioural tests for nearest-neighbour planning and the plan boundary.

use std::cell::RefCell;
use std::collections::BTreeMap;

use lovetrip_core::{
    Coordinate, NearestNeighbourPlanner, Place, PlanError, PlanRequest,
    PlanRequestValidationError, PlanResponse, RoutePlanner, UNCLASSIFIED_REGION, optimize_route,
    optimize_routes_by_region,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const CITY_HALL: Coordinate = Coordinate::new(37.5665, 126.978);

/// World state shared by planner scenarios.
#[derive(Debug, Default)]
struct PlannerWorld {
    start: RefCell<Option<Coordinate>>,
    places: RefCell<Vec<Place>>,
    route: RefCell<Option<Vec<Place>>>,
    regions: RefCell<Option<BTreeMap<String, Vec<Place>>>>,
    request: RefCell<Option<PlanRequest>>,
    outcome: RefCell<Option<Result<PlanResponse, PlanError>>>,
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

fn place(id: &str, lat: f64, lng: f64) -> Place {
    Place::new(id, id, Coordinate::new(lat, lng))
}

#[given("a start point at Seoul City Hall")]
fn given_start(world: &PlannerWorld) {
    world.start.replace(Some(CITY_HALL));
}

#[given("candidate places far, near and mid")]
fn given_candidates(world: &PlannerWorld) {
    world.places.replace(vec![
        place("far", 37.5, 127.0),
        place("near", 37.5651, 126.9895),
        place("mid", 37.56, 126.99),
    ]);
}

#[given("no candidate places")]
fn given_no_candidates(world: &PlannerWorld) {
    world.places.replace(Vec::new());
}

#[given("places in Seoul, Busan and one without an area code")]
fn given_regional_places(world: &PlannerWorld) {
    world.places.replace(vec![
        place("seoul-a", 37.56, 126.97).with_area_code(1),
        place("busan-a", 35.18, 129.07).with_area_code(6),
        place("seoul-b", 37.57, 126.99).with_area_code(1),
        place("jeju", 33.5, 126.5),
        place("busan-b", 35.16, 129.16).with_area_code(6),
    ]);
}

#[given("a plan request that lists the same place twice")]
fn given_duplicate_request(world: &PlannerWorld) {
    let twice = place("twice", 37.56, 126.99);
    world.request.replace(Some(PlanRequest {
        start: Some(CITY_HALL),
        places: vec![twice.clone(), place("other", 37.5, 127.0), twice],
        by_region: false,
    }));
}

#[when("I optimise the route")]
fn when_optimise(world: &PlannerWorld) {
    let start = world
        .start
        .borrow()
        .expect("start should be set before planning");
    let route = optimize_route(&start, world.places.borrow().as_slice());
    world.route.replace(Some(route));
}

#[when("I optimise the routes by region")]
fn when_optimise_by_region(world: &PlannerWorld) {
    let routes = optimize_routes_by_region(&world.places.borrow());
    world.regions.replace(Some(routes));
}

#[when("I submit the plan request")]
fn when_submit(world: &PlannerWorld) {
    let outcome = {
        let request = world.request.borrow();
        let request = request.as_ref().expect("request should be set");
        NearestNeighbourPlanner.plan(request)
    };
    world.outcome.replace(Some(outcome));
}

fn route_ids(world: &PlannerWorld) -> Vec<String> {
    world
        .route
        .borrow()
        .as_ref()
        .expect("route should be planned")
        .iter()
        .map(|p| p.id.clone())
        .collect()
}

#[then("the route visits near, mid, far in that order")]
fn then_order(world: &PlannerWorld) {
    assert_eq!(route_ids(world), ["near", "mid", "far"]);
}

#[then("the start point is not part of the route")]
fn then_start_excluded(world: &PlannerWorld) {
    let route = world.route.borrow();
    let route = route.as_ref().expect("route should be planned");
    assert!(route.iter().all(|p| p.location != CITY_HALL));
}

#[then("the route is empty")]
fn then_empty(world: &PlannerWorld) {
    assert!(route_ids(world).is_empty());
}

#[then("routes exist for regions 1, 6 and other")]
fn then_regions(world: &PlannerWorld) {
    let regions = world.regions.borrow();
    let regions = regions.as_ref().expect("regions should be planned");
    let keys: Vec<&str> = regions.keys().map(String::as_str).collect();
    assert_eq!(keys, ["1", "6", UNCLASSIFIED_REGION]);
}

#[then("every place appears exactly once across the regions")]
fn then_each_place_once(world: &PlannerWorld) {
    let regions = world.regions.borrow();
    let regions = regions.as_ref().expect("regions should be planned");
    let mut planned: Vec<String> = regions
        .values()
        .flatten()
        .map(|p| p.id.clone())
        .collect();
    planned.sort();
    let mut expected: Vec<String> = world.places.borrow().iter().map(|p| p.id.clone()).collect();
    expected.sort();
    assert_eq!(planned, expected);
}

#[then("the plan fails with a duplicate place id error")]
fn then_duplicate_error(world: &PlannerWorld) {
    let outcome = world.outcome.borrow();
    let outcome = outcome.as_ref().expect("plan should have run");
    assert!(matches!(
        outcome,
        Err(PlanError::InvalidRequest(
            PlanRequestValidationError::DuplicatePlaceId { id }
        )) if id == "twice"
    ));
}

#[scenario(path = "tests/features/planner.feature", index = 0)]
fn nearest_first(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 1)]
fn empty_route(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 2)]
fn per_region(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 3)]
fn duplicate_ids_rejected(world: PlannerWorld) {
    let _ = world;
}
