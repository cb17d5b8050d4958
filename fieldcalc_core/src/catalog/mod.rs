//! # Template Catalog
//!
//! The built-in formula catalog, grouped into weight/volume, machining, and
//! coordinate templates. [`build_templates`] is the single entry point: given
//! the current settings it constructs the full ordered list, with settings
//! values (decimal places aside, those apply at formatting time) baked into
//! the descriptors. Change the settings, rebuild the catalog.

mod coords;
mod machining;
mod weights;

pub use coords::build_coordinate_templates;
pub use machining::build_machining_templates;
pub use weights::{build_weight_templates, density_for, material_options};

use crate::settings::Settings;
use crate::template::{Group, Template};

/// Build the full template catalog for the given settings.
///
/// Group order is fixed: Weight, then Machining, then Coordinates. Within a
/// group the order is the curated one the builders emit.
pub fn build_templates(settings: &Settings) -> Vec<Template> {
    let mut templates = build_weight_templates(settings);
    templates.extend(build_machining_templates(settings));
    templates.extend(build_coordinate_templates(settings));
    templates
}

/// Look up a template by id.
pub fn find<'a>(templates: &'a [Template], id: &str) -> Option<&'a Template> {
    templates.iter().find(|t| t.id == id)
}

/// Templates of one group, in catalog order.
pub fn by_group<'a>(templates: &'a [Template], group: Group) -> Vec<&'a Template> {
    templates.iter().filter(|t| t.group == group).collect()
}
