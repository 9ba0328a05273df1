//! CSV route export.
//!
//! Creates two files in the configured output directory:
//! - `route_points.csv`
//! - `route_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::RouteWriter;
use crate::{IoResult, RoutePointRow, RouteSummaryRow};

/// Writes routes to two CSV files.
pub struct CsvRouteWriter {
    points:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvRouteWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header
    /// rows.  `dir` must exist.
    pub fn new(dir: &Path) -> IoResult<Self> {
        let mut points = Writer::from_path(dir.join("route_points.csv"))?;
        points.write_record(["variant", "seq", "lat", "lon", "node_id", "hazard_level"])?;

        let mut summaries = Writer::from_path(dir.join("route_summaries.csv"))?;
        summaries.write_record(["variant", "distance_m", "time_s", "risk_score", "instruction_count"])?;

        Ok(Self { points, summaries, finished: false })
    }
}

impl RouteWriter for CsvRouteWriter {
    fn write_points(&mut self, rows: &[RoutePointRow]) -> IoResult<()> {
        for row in rows {
            self.points.write_record(&[
                row.variant.clone(),
                row.seq.to_string(),
                format!("{:.7}", row.lat),
                format!("{:.7}", row.lon),
                row.node_id.map(|n| n.to_string()).unwrap_or_default(),
                format!("{:.1}", row.hazard_level),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &RouteSummaryRow) -> IoResult<()> {
        self.summaries.write_record(&[
            row.variant.clone(),
            format!("{:.1}", row.distance_m),
            format!("{:.1}", row.time_s),
            format!("{:.1}", row.risk_score),
            row.instruction_count.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> IoResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.points.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
