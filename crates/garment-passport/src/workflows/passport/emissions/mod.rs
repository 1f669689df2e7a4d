//! Multi-leg supply-chain emissions estimator.
//!
//! Three legs in fixed order — primary production → mill → garment
//! construction → client-ready warehouse — each measured with the haversine
//! formula and costed with a per-mode emission factor at a fixed garment
//! weight of 1.5 kg.

mod geo;
mod origins;

pub use geo::{haversine_km, CoordinateError, Waypoint, EARTH_RADIUS_KM};

use serde::{Deserialize, Serialize};

use super::domain::WaypointSet;

/// Assumed shipped weight per garment, in tonnes.
pub const GARMENT_WEIGHT_TONNES: f64 = 0.0015;

/// Transport mode assigned to a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportMode {
    Sea,
    Road,
    Air,
}

impl TransportMode {
    pub const fn label(self) -> &'static str {
        match self {
            TransportMode::Sea => "Sea",
            TransportMode::Road => "Road",
            TransportMode::Air => "Air",
        }
    }

    /// Emission factor in kg CO2e per tonne-km (DEFRA/DHL approximations).
    pub const fn factor(self) -> f64 {
        match self {
            TransportMode::Sea => 0.05,
            TransportMode::Road => 0.10,
            TransportMode::Air => 0.60,
        }
    }
}

/// How transport modes are assigned to the three legs.
///
/// The two policies are not equivalent and are never blended; one is chosen
/// when the estimator is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModePolicy {
    /// Sea for raw-material shipping, road between mill and construction,
    /// air for the final delivery leg.
    #[default]
    FixedByLeg,
    /// Same-country legs travel by road, cross-country legs by air.
    CountryInference,
}

/// One segment of the supply-chain journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsLeg {
    pub label: String,
    pub from: String,
    pub to: String,
    /// Rounded for display; emissions math uses the unrounded distance.
    pub distance_km: u32,
    pub mode: TransportMode,
    /// kg CO2e at 2-decimal precision.
    pub emissions_kg: f64,
}

/// The four resolved route endpoints, echoed back for report rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLocations {
    pub primary: Waypoint,
    pub mill: Waypoint,
    pub production: Waypoint,
    pub warehouse: Waypoint,
}

/// Aggregate of the three legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsSummary {
    pub locations: RouteLocations,
    pub legs: Vec<EmissionsLeg>,
    pub total_distance_km: u32,
    pub total_emissions_kg: f64,
    /// Distance-derived sub-score fed back into the answer map under the
    /// readonly transport question.
    pub transport_score: u32,
}

/// Map a rounded total route distance to the discrete transport sub-score.
/// Boundary values resolve to the lower-scoring branch.
pub fn transport_score(total_distance_km: u32) -> u32 {
    if total_distance_km < 15_000 {
        5
    } else if total_distance_km < 20_000 {
        2
    } else {
        0
    }
}

/// Deterministic, synchronous estimator over a chain of waypoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmissionsEstimator {
    policy: ModePolicy,
}

impl EmissionsEstimator {
    pub fn new(policy: ModePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ModePolicy {
        self.policy
    }

    /// Estimate the route for a material and its waypoints.
    ///
    /// Returns `Ok(None)` while the mill, production, or warehouse stop is
    /// missing — "not yet computable", not an error. Non-finite coordinates
    /// are rejected before any distance is taken.
    pub fn estimate(
        &self,
        material: &str,
        waypoints: &WaypointSet,
    ) -> Result<Option<EmissionsSummary>, CoordinateError> {
        if let Some(primary) = &waypoints.primary {
            primary.validate()?;
        }
        for stop in [&waypoints.mill, &waypoints.production, &waypoints.warehouse]
            .into_iter()
            .flatten()
        {
            stop.validate()?;
        }

        let (Some(mill), Some(production), Some(warehouse)) =
            (&waypoints.mill, &waypoints.production, &waypoints.warehouse)
        else {
            return Ok(None);
        };

        let primary = waypoints
            .primary
            .clone()
            .unwrap_or_else(|| origins::default_origin(material));

        let route = [
            ("Primary Production → Milling", &primary, mill),
            ("Milling → Garment Construction", mill, production),
            ("Garment Construction → Ready for Client", production, warehouse),
        ];

        let mut legs = Vec::with_capacity(route.len());
        let mut total_distance = 0.0;
        let mut total_emissions = 0.0;

        for (position, (label, from, to)) in route.into_iter().enumerate() {
            let distance = haversine_km(from, to);
            let mode = self.assign_mode(position, from, to);
            let emissions = distance * GARMENT_WEIGHT_TONNES * mode.factor();

            total_distance += distance;
            total_emissions += emissions;

            legs.push(EmissionsLeg {
                label: label.to_string(),
                from: from.name.clone(),
                to: to.name.clone(),
                distance_km: distance.round() as u32,
                mode,
                emissions_kg: round2(emissions),
            });
        }

        let total_distance_km = total_distance.round() as u32;

        Ok(Some(EmissionsSummary {
            locations: RouteLocations {
                primary,
                mill: mill.clone(),
                production: production.clone(),
                warehouse: warehouse.clone(),
            },
            legs,
            total_distance_km,
            total_emissions_kg: round2(total_emissions),
            transport_score: transport_score(total_distance_km),
        }))
    }

    fn assign_mode(&self, position: usize, from: &Waypoint, to: &Waypoint) -> TransportMode {
        match self.policy {
            ModePolicy::FixedByLeg => match position {
                0 => TransportMode::Sea,
                1 => TransportMode::Road,
                _ => TransportMode::Air,
            },
            ModePolicy::CountryInference => {
                if same_country(from, to) {
                    TransportMode::Road
                } else {
                    TransportMode::Air
                }
            }
        }
    }
}

fn same_country(a: &Waypoint, b: &Waypoint) -> bool {
    country_of(a).eq_ignore_ascii_case(country_of(b))
}

/// Falls back to the trailing segment of the display name ("City, Country")
/// when the country field was left blank.
fn country_of(waypoint: &Waypoint) -> &str {
    let country = waypoint.country.trim();
    if !country.is_empty() {
        return country;
    }
    waypoint
        .name
        .rsplit(", ")
        .next()
        .unwrap_or(waypoint.name.as_str())
        .trim()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
