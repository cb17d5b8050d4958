//! # Settings
//!
//! Display precision and the default density pre-filled into weight
//! templates. Loaded once at startup, mutated only by an explicit
//! settings-apply action, and handed to
//! [`build_templates`](crate::catalog::build_templates) - density defaults
//! are baked into input descriptors at registry-construction time, so the
//! owning shell rebuilds the registry wholesale after a change.

use serde::{Deserialize, Serialize};

/// User-tunable application settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Decimal places shown in formatted results
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,

    /// Density pre-filled into weight-template inputs (g/cm³)
    #[serde(default = "default_density")]
    pub density_default: f64,
}

fn default_decimal_places() -> u32 {
    3
}

fn default_density() -> f64 {
    7.85
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            decimal_places: default_decimal_places(),
            density_default: default_density(),
        }
    }
}
