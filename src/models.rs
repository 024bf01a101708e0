use serde::{Deserialize, Serialize};

/// Sepal measurements; both fields are required on creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sepal {
    pub length: f64,
    pub width: f64,
}

/// Petal measurements; both fields are required on creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Petal {
    pub length: f64,
    pub width: f64,
}

/// A stored flower specimen.
///
/// The creation payload omits `_id`; the store assigns one on insert and it
/// is immutable afterwards. Every other field is required, so a request body
/// missing a measurement or the species fails deserialization before any
/// store call is made.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Flower {
    /// Serialized as `_id` at the boundary, omitted while unassigned.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub sepal: Sepal,
    pub petal: Petal,
    pub species: String,
}

/// Partial-update shape for [`Sepal`]; absent fields mean "leave unchanged".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SepalUpdate {
    pub length: Option<f64>,
    pub width: Option<f64>,
}

/// Partial-update shape for [`Petal`]; absent fields mean "leave unchanged".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PetalUpdate {
    pub length: Option<f64>,
    pub width: Option<f64>,
}

/// Update payload for a flower. There is no `_id` here: the identifier is
/// not updatable. This type is only ever an input; it is never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FlowerUpdate {
    pub sepal: Option<SepalUpdate>,
    pub petal: Option<PetalUpdate>,
    pub species: Option<String>,
}
