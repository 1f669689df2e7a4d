use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::emissions::Waypoint;

/// Identifier wrapper for issued passports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassportId(pub String);

/// Sparse map from question id to the raw answer value.
///
/// Keys that do not exist in the rubric are ignored by scoring; missing keys
/// contribute zero points. A fresh map is consumed per scoring invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<String, String>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(question_id.into(), value.into());
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn remove(&mut self, question_id: &str) -> Option<String> {
        self.0.remove(question_id)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Order context carried on a passport so reports can identify the garment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,
    /// Canonical material label, e.g. "Wool"; drives pillar 1 certification
    /// questions and the default primary-production origin.
    pub material: String,
}

/// Supply-chain waypoints selected by the merchant.
///
/// `primary` overrides the material-default production origin. The mill,
/// construction, and warehouse stops must all be present before emissions
/// become computable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaypointSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<Waypoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mill: Option<Waypoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<Waypoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<Waypoint>,
}

impl WaypointSet {
    /// True when the three mandatory stops are all present.
    pub fn route_complete(&self) -> bool {
        self.mill.is_some() && self.production.is_some() && self.warehouse.is_some()
    }
}

/// Merchant-provided inputs for creating or replacing a passport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportSubmission {
    pub order: OrderSnapshot,
    #[serde(default)]
    pub waypoints: WaypointSet,
    #[serde(default)]
    pub answers: AnswerMap,
}
