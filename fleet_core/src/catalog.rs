//! Indicator catalog: the controlled list of event category labels.
//!
//! The catalog is seeded from a fixed base list and may grow at runtime;
//! labels are never removed.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The one indicator with extra validation: speeding events must carry a
/// positive speed in km/h.
pub const SPEEDING_INDICATOR: &str = "Exceso de velocidad";

/// Base indicator labels every session starts with
const BASE_INDICATORS: [&str; 24] = [
    "Instalacion de dispositivo",
    "Revision de dispositivo",
    "Reemplazo de dispositivo",
    "Reubicacion de dispositivo",
    "Reubicacion de equipo",
    "Exceso de velocidad",
    "Fallas de equipo",
    "Supension de gps",
    "Sistema de gps",
    "Dañadas en el taller",
    "Averia de equipo",
    "Rutas no permitidas",
    "Secuestro de unidad",
    "Paradas largas por unidad accidentada",
    "Camara cubierta",
    "Uso de celular",
    "Ojos cerrados",
    "Bostezo",
    "Fumar",
    "Traslado de personal",
    "Cruce indebido",
    "Fuera de ruta",
    "Carga no autorizada",
    "Parada no autorizada",
];

/// Cached default catalog - built once and reused across all sessions
static DEFAULT_CATALOG: Lazy<IndicatorCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn default_catalog() -> &'static IndicatorCatalog {
    &DEFAULT_CATALOG
}

/// Builds a fresh catalog holding the base indicator list
///
/// **Note**: prefer `default_catalog()` when a read-only reference is
/// enough. Sessions clone from this when they need to grow the list.
pub fn build_default_catalog() -> IndicatorCatalog {
    IndicatorCatalog::new(BASE_INDICATORS.iter().map(|s| s.to_string()))
}

/// Ordered, duplicate-free set of indicator labels
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorCatalog {
    labels: Vec<String>,
}

impl IndicatorCatalog {
    /// Build a catalog from labels, keeping first occurrences in order and
    /// dropping empty entries and duplicates
    pub fn new(labels: impl IntoIterator<Item = String>) -> Self {
        let mut catalog = IndicatorCatalog { labels: Vec::new() };
        for label in labels {
            catalog.add(label);
        }
        catalog
    }

    /// Append a label if it is non-empty and not already present.
    ///
    /// Returns true when the catalog grew.
    pub fn add(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.labels.push(trimmed.to_string());
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Validate the catalog for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.labels.is_empty() {
            errors.push("Catalog has no indicators".to_string());
        }

        for (i, label) in self.labels.iter().enumerate() {
            if label.trim().is_empty() {
                errors.push(format!("Indicator at position {} is empty", i));
            }
            if self.labels[..i].contains(label) {
                errors.push(format!("Duplicate indicator '{}'", label));
            }
        }

        errors
    }
}
