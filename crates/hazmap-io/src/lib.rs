//! `hazmap-io`: file formats around the hazmap route planner.
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`loader`] | JSON `NetworkSpec` load/save, hazard-zone CSV loading     |
//! | [`writer`] | `RouteWriter` trait                                       |
//! | [`csv`]    | `CsvRouteWriter`: `route_points.csv`, `route_summaries.csv` |
//! | [`row`]    | `RoutePointRow`, `RouteSummaryRow`                        |
//!
//! # Usage
//!
//! ```rust,ignore
//! use hazmap_io::{load_hazard_zones_csv, load_network_spec, CsvRouteWriter, RouteWriter};
//!
//! let mut network = load_network_spec(Path::new("taipei.json"))?.generate()?;
//! network.apply_hazard_zones(&load_hazard_zones_csv(Path::new("hazards.csv"))?)?;
//!
//! let route = plan_route(&network, start, end, &RouteOptions::default())?;
//! let mut writer = CsvRouteWriter::new(Path::new("./output"))?;
//! writer.write_route("balanced", &route, &network)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod loader;
pub mod row;
pub mod writer;


pub use csv::CsvRouteWriter;
pub use error::{IoError, IoResult};
pub use loader::{
    load_hazard_zones_csv, load_hazard_zones_reader, load_network_spec, load_network_spec_reader,
    save_network_spec, write_network_spec,
};
pub use row::{RoutePointRow, RouteSummaryRow};
pub use writer::RouteWriter;
