//! Turn classification and turn-by-turn instruction text.
//!
//! Instructions are derived purely from the route polyline: for each
//! interior point the signed change of heading between the incoming and
//! outgoing legs is classified into a [`Turn`].  Headings are taken over at
//! least [`TURN_SPAN_M`] of polyline on each side, so metre-scale wobble in
//! densely sampled roads does not read as a turn, and only the sharpest
//! point of a bend within that span is announced.  Road names attached to
//! the points add "onto <road>" phrasing and announce straight-through name
//! changes.

use std::fmt;

use hazmap_core::geo::{compass_label, turn_angle_deg};
use hazmap_core::GeoPoint;

/// Legs shorter than this are treated as repeated points and skipped, so a
/// query point that coincides with its snapped node yields no spurious turn.
const MIN_LEG_M: f64 = 0.5;

/// Minimum polyline length behind and ahead of a point used to measure its
/// incoming and outgoing headings.  Also the window within which weaker
/// turn readings yield to the sharpest one.
pub const TURN_SPAN_M: f64 = 40.0;

// ── Turn ──────────────────────────────────────────────────────────────────────

/// Turn category for a signed heading change.  Positive angles turn right.
///
/// | `|angle|`       | Category        |
/// |-----------------|-----------------|
/// | `< 15`          | `Straight`      |
/// | `15 ..< 45`     | `Slight*`       |
/// | `45 ..< 135`    | `Left`/`Right`  |
/// | `>= 135`        | `Sharp*`        |
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Turn {
    Straight,
    SlightLeft,
    SlightRight,
    Left,
    Right,
    SharpLeft,
    SharpRight,
}

impl Turn {
    pub fn as_str(self) -> &'static str {
        match self {
            Turn::Straight    => "straight",
            Turn::SlightLeft  => "slight_left",
            Turn::SlightRight => "slight_right",
            Turn::Left        => "left",
            Turn::Right       => "right",
            Turn::SharpLeft   => "sharp_left",
            Turn::SharpRight  => "sharp_right",
        }
    }

    /// Imperative phrase used in instruction text.
    pub fn phrase(self) -> &'static str {
        match self {
            Turn::Straight    => "continue straight",
            Turn::SlightLeft  => "bear left",
            Turn::SlightRight => "bear right",
            Turn::Left        => "turn left",
            Turn::Right       => "turn right",
            Turn::SharpLeft   => "make a sharp left",
            Turn::SharpRight  => "make a sharp right",
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a signed turn angle in degrees (positive = right).
pub fn classify_turn(angle_deg: f64) -> Turn {
    let a = angle_deg.abs();
    let right = angle_deg > 0.0;
    if a < 15.0 {
        Turn::Straight
    } else if a < 45.0 {
        if right { Turn::SlightRight } else { Turn::SlightLeft }
    } else if a < 135.0 {
        if right { Turn::Right } else { Turn::Left }
    } else if right {
        Turn::SharpRight
    } else {
        Turn::SharpLeft
    }
}

// ── Instruction ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Maneuver {
    Depart,
    Turn(Turn),
    /// Straight through onto a differently named road.
    Continue,
    Arrive,
}

/// One step of turn-by-turn guidance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// Index into the route's point list where the maneuver happens.
    pub point_index: usize,
    pub maneuver:    Maneuver,
    /// Metres travelled since the previous instruction.
    pub distance_m:  f64,
    /// Road followed after the maneuver, when known.
    pub road:        Option<String>,
    pub text:        String,
}

/// Human-readable distance: metres rounded to 10 below 1 km, otherwise
/// kilometres with one decimal.
pub fn format_distance(meters: f64) -> String {
    let rounded = (meters.max(0.0) / 10.0).round() * 10.0;
    if rounded >= 1000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{} m", rounded as u64)
    }
}

/// Build instructions for a polyline.
///
/// `roads[i]` is the road name at `points[i]` (`None` for raw query points
/// and unnamed nodes).  `sample_every > 0` adds a "continue straight"
/// reminder every that many points without another instruction; `0` emits
/// turns only.
///
/// The list always starts with [`Maneuver::Depart`] and ends with
/// [`Maneuver::Arrive`]; a route with no movement yields only the arrival.
pub fn build_instructions(
    points: &[GeoPoint],
    roads: &[Option<&str>],
    sample_every: usize,
) -> Vec<Instruction> {
    debug_assert_eq!(points.len(), roads.len());
    let road_at = |i: usize| roads.get(i).copied().flatten();

    let mut kept: Vec<usize> = Vec::with_capacity(points.len());
    for i in 0..points.len() {
        match kept.last() {
            Some(&prev) if points[prev].distance_m(points[i]) < MIN_LEG_M => {}
            _ => kept.push(i),
        }
    }

    let last_index = points.len().saturating_sub(1);
    if kept.len() < 2 {
        return vec![Instruction {
            point_index: last_index,
            maneuver:    Maneuver::Arrive,
            distance_m:  0.0,
            road:        None,
            text:        "Arrive at your destination".to_string(),
        }];
    }

    // Road of the leg a → b: the far end's name, else the near end's.
    let leg_road = |a: usize, b: usize| road_at(b).or(road_at(a));

    let mut out = Vec::new();
    let mut current = leg_road(kept[0], kept[1]);
    let heading = compass_label(points[kept[0]].bearing_deg(points[kept[1]]));
    out.push(Instruction {
        point_index: kept[0],
        maneuver:    Maneuver::Depart,
        distance_m:  0.0,
        road:        current.map(str::to_string),
        text:        match current {
            Some(road) => format!("Head {heading} on {road}"),
            None       => format!("Head {heading}"),
        },
    });

    let angles = span_angles(points, &kept);
    let mut since_last = 0.0;
    let mut quiet_points = 0usize;
    for k in 1..kept.len() - 1 {
        let (a, b, c) = (kept[k - 1], kept[k], kept[k + 1]);
        since_last += points[a].distance_m(points[b]);
        quiet_points += 1;

        let turn = match angles[k] {
            Some(angle) => classify_turn(angle),
            None => Turn::Straight,
        };
        let next = leg_road(b, c);
        let renamed = next.is_some() && next != current;
        let dist = format_distance(since_last);

        let (maneuver, text) = if turn != Turn::Straight {
            let text = match next {
                Some(road) if renamed => format!("In {dist}, {} onto {road}", turn.phrase()),
                _ => format!("In {dist}, {}", turn.phrase()),
            };
            (Maneuver::Turn(turn), text)
        } else if let (true, Some(road)) = (renamed, next) {
            (Maneuver::Continue, format!("In {dist}, continue onto {road}"))
        } else if sample_every > 0 && quiet_points >= sample_every {
            (Maneuver::Turn(Turn::Straight), format!("In {dist}, {}", Turn::Straight.phrase()))
        } else {
            continue;
        };

        if next.is_some() {
            current = next;
        }
        out.push(Instruction {
            point_index: b,
            maneuver,
            distance_m: since_last,
            road: current.map(str::to_string),
            text,
        });
        since_last = 0.0;
        quiet_points = 0;
    }

    let (pen, end) = (kept[kept.len() - 2], kept[kept.len() - 1]);
    since_last += points[pen].distance_m(points[end]);
    out.push(Instruction {
        point_index: end,
        maneuver:    Maneuver::Arrive,
        distance_m:  since_last,
        road:        None,
        text:        format!("In {}, arrive at your destination", format_distance(since_last)),
    });
    out
}

/// Signed turn angle at each kept point, measured over [`TURN_SPAN_M`] on
/// both sides.  `None` at the two ends and wherever a sharper reading lies
/// within the span (ties go to the earlier point).
fn span_angles(points: &[GeoPoint], kept: &[usize]) -> Vec<Option<f64>> {
    let n = kept.len();
    let mut along = Vec::with_capacity(n);
    let mut total = 0.0;
    for (k, &i) in kept.iter().enumerate() {
        if k > 0 {
            total += points[kept[k - 1]].distance_m(points[i]);
        }
        along.push(total);
    }

    let raw: Vec<f64> = (0..n)
        .map(|k| {
            if k == 0 || k == n - 1 {
                return 0.0;
            }
            let back = (0..k).rev().find(|&j| along[k] - along[j] >= TURN_SPAN_M).unwrap_or(0);
            let ahead = (k + 1..n).find(|&j| along[j] - along[k] >= TURN_SPAN_M).unwrap_or(n - 1);
            let here = points[kept[k]];
            turn_angle_deg(points[kept[back]].bearing_deg(here), here.bearing_deg(points[kept[ahead]]))
        })
        .collect();

    (0..n)
        .map(|k| {
            if k == 0 || k == n - 1 {
                return None;
            }
            let strength = raw[k].abs();
            let beaten_before = (1..k)
                .rev()
                .take_while(|&j| along[k] - along[j] < TURN_SPAN_M)
                .any(|j| raw[j].abs() >= strength);
            let beaten_after = (k + 1..n - 1)
                .take_while(|&j| along[j] - along[k] < TURN_SPAN_M)
                .any(|j| raw[j].abs() > strength);
            (!beaten_before && !beaten_after).then_some(raw[k])
        })
        .collect()
}
