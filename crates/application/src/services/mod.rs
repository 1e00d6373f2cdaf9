//! Application services

mod connection_service;
mod geo_resolver;
mod reachability;
mod route_approximator;
mod route_planner;
pub mod schedule;

pub use connection_service::ConnectionService;
pub use geo_resolver::{GeoResolver, ResolverSource};
pub use reachability::ReachabilityCheck;
pub use route_approximator::RouteApproximator;
pub use route_planner::{RouteError, RoutePlan, RoutePlanner};
