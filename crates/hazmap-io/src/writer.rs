//! The `RouteWriter` trait implemented by route export backends.

use hazmap_network::RoadNetwork;
use hazmap_routing::Route;

use crate::{IoResult, RoutePointRow, RouteSummaryRow};

/// Sink for planned routes.
pub trait RouteWriter {
    /// Write the polyline rows of one route.
    fn write_points(&mut self, rows: &[RoutePointRow]) -> IoResult<()>;

    /// Write one route summary row.
    fn write_summary(&mut self, row: &RouteSummaryRow) -> IoResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> IoResult<()>;

    /// Write both the points and the summary of `route` under `variant`.
    fn write_route(&mut self, variant: &str, route: &Route, network: &RoadNetwork) -> IoResult<()> {
        self.write_points(&RoutePointRow::from_route(variant, route, network))?;
        self.write_summary(&RouteSummaryRow::from_route(variant, route))
    }
}
