use serde_json::Value;

/// Unit system a report is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    Imperial,
    Metric,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Metric => "metric",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which unit system a field belongs to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Always,
    ImperialOnly,
    MetricOnly,
}

impl Applicability {
    pub fn matches(&self, units: UnitSystem) -> bool {
        match self {
            Applicability::Always => true,
            Applicability::ImperialOnly => units == UnitSystem::Imperial,
            Applicability::MetricOnly => units == UnitSystem::Metric,
        }
    }
}

/// One fragment of the weather report: where the value lives in the
/// response document and how to print it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Nested keys leading to the value. Every element but the last names
    /// an object in the document.
    pub path: &'static [&'static str],
    /// Printed before the value.
    pub prefix: &'static str,
    /// Printed after the value. Suffixes carry their own line breaks, so
    /// consecutive fields can share a line (humidity/dewpoint, wind
    /// direction/speed).
    pub suffix: &'static str,
    pub units: Applicability,
}

const fn field(
    path: &'static [&'static str],
    prefix: &'static str,
    suffix: &'static str,
    units: Applicability,
) -> FieldSpec {
    FieldSpec { path, prefix, suffix, units }
}

use Applicability::{Always, ImperialOnly, MetricOnly};

/// The report fields, in print order.
///
/// The conditions/astronomy response nests its groups irregularly
/// (current conditions, moon phase, sun phase), so each entry spells out
/// its full key path instead of the code branching per group.
pub const FIELDS: &[FieldSpec] = &[
    field(&["current_observation", "display_location", "full"], "Location : ", "\n", Always),
    field(&["current_observation", "local_time_rfc822"], "", "\n", Always),
    field(&["current_observation", "weather"], "Condition : ", "\n", Always),
    field(&["current_observation", "temperature_string"], "Temperature :", "\n", Always),
    field(&["current_observation", "relative_humidity"], "Humidity :", " / ", Always),
    field(&["current_observation", "dewpoint_string"], "Dewpoint :", "\n", Always),
    field(&["current_observation", "pressure_in"], "Pressure :", " in hg. ", ImperialOnly),
    field(&["current_observation", "pressure_mb"], "Pressure :", " mb ", MetricOnly),
    field(&["current_observation", "pressure_trend"], "Trend ", "\n", Always),
    field(&["current_observation", "visibility_mi"], "Visibility :", "mi\n", ImperialOnly),
    field(&["current_observation", "visibility_km"], "Visibility :", "km\n", MetricOnly),
    field(&["current_observation", "wind_dir"], "Wind: ", "", Always),
    field(&["current_observation", "wind_mph"], " @ ", " mph\n", ImperialOnly),
    field(&["current_observation", "wind_kph"], " @ ", " kph\n", MetricOnly),
    field(&["current_observation", "precip_today_string"], "precip :", "\n", Always),
    field(&["moon_phase", "phaseofMoon"], "Moon : ", "", Always),
    field(&["moon_phase", "percentIlluminated"], " ", "%\n", Always),
    field(&["sun_phase", "sunrise", "hour"], "Sunrise : ", "", Always),
    field(&["sun_phase", "sunrise", "minute"], ":", " ; ", Always),
    field(&["sun_phase", "sunset", "hour"], "Sunset : ", "", Always),
    field(&["sun_phase", "sunset", "minute"], ":", "\n", Always),
];

/// What a conditions query produced.
///
/// Service-level failures (bad key, ambiguous location) arrive in a
/// successful HTTP body, so they are outcomes rather than `Err` values.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Full response document, ready for rendering.
    Report(Value),
    /// The service rejected the query; carries its own description.
    ApiError(String),
    /// The location matched several places; one object per candidate.
    AmbiguousLocation(Vec<serde_json::Map<String, Value>>),
}
