//! # Weight and Volume Templates
//!
//! Material weights from dimensions and density, plus plain volumes.
//! Dimensions are millimetres, densities g/cm³, weights kilograms:
//! volume_mm³ × 1e-9 gives m³, density × 1000 gives kg/m³.

use std::f64::consts::PI;

use crate::errors::CalcError;
use crate::settings::Settings;
use crate::template::{
    ComputeOutput, Group, InputField, ResultSpec, ResultValue, SelectOption, Template,
};

/// Density (g/cm³) for a material code, falling back to the given default
/// for unknown codes.
pub fn density_for(code: &str, fallback: f64) -> f64 {
    match code {
        "SS" => 7.85,
        "SUS" => 8.00,
        "AL" => 2.70,
        "CU" => 8.90,
        _ => fallback,
    }
}

pub fn material_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("SS", "SS (steel)"),
        SelectOption::new("SUS", "SUS (stainless)"),
        SelectOption::new("AL", "AL (aluminum)"),
        SelectOption::new("CU", "CU (copper)"),
    ]
}

fn weight_kg(volume_mm3: f64, density_g_cm3: f64) -> f64 {
    volume_mm3 * 1e-9 * density_g_cm3 * 1000.0
}

/// Volume in mm³ plus the cm³ and litre conversions as secondary values.
fn volume_output(mm3: f64) -> ComputeOutput {
    ComputeOutput::PrimaryWithOthers {
        primary: ResultValue::new("volume", mm3, "mm³"),
        others: vec![
            ResultValue::new("volume", mm3 / 1_000.0, "cm³"),
            ResultValue::new("volume", mm3 / 1_000_000.0, "L"),
        ],
    }
}

pub fn build_weight_templates(settings: &Settings) -> Vec<Template> {
    let density_default = settings.density_default;

    vec![
        Template {
            id: "w_roundbar",
            group: Group::Weight,
            title: "Round bar weight (kg)".to_string(),
            description: "diameter d, length L, material -> weight".to_string(),
            tags: vec!["material select".to_string()],
            inputs: vec![
                InputField::numeric("d", "Diameter d (mm)").with_hint("e.g. 50"),
                InputField::numeric("L", "Length L (mm)").with_hint("e.g. 1000"),
                InputField::select("mat", "Material", material_options(), "SS"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("weight", "kg"),
            compute: Box::new(move |v| {
                let d = v.require("d")?;
                let len = v.require("L")?;
                let rho = density_for(v.choice("mat").unwrap_or("SS"), density_default);
                let volume_mm3 = PI * d * d / 4.0 * len;
                Ok(ComputeOutput::Number(weight_kg(volume_mm3, rho)))
            }),
        },
        Template {
            id: "w_plate",
            group: Group::Weight,
            title: "Plate weight (kg)".to_string(),
            description: "t x W x L, material -> weight".to_string(),
            tags: vec!["material select".to_string()],
            inputs: vec![
                InputField::numeric("t", "Thickness t (mm)").with_hint("e.g. 12"),
                InputField::numeric("W", "Width W (mm)").with_hint("e.g. 200"),
                InputField::numeric("L", "Length L (mm)").with_hint("e.g. 1000"),
                InputField::select("mat", "Material", material_options(), "SS"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("weight", "kg"),
            compute: Box::new(move |v| {
                let t = v.require("t")?;
                let w = v.require("W")?;
                let len = v.require("L")?;
                let rho = density_for(v.choice("mat").unwrap_or("SS"), density_default);
                Ok(ComputeOutput::Number(weight_kg(t * w * len, rho)))
            }),
        },
        Template {
            id: "w_pipe",
            group: Group::Weight,
            title: "Pipe weight (kg)".to_string(),
            description: "outer diameter D, wall t, length L, density -> weight".to_string(),
            tags: vec!["piping".to_string()],
            inputs: vec![
                InputField::numeric("D", "Outer diameter D (mm)").with_hint("e.g. 60.5"),
                InputField::numeric("t", "Wall thickness t (mm)").with_hint("e.g. 3.2"),
                InputField::numeric("L", "Length L (mm)").with_hint("e.g. 1000"),
                InputField::numeric("rho", "Density ρ (g/cm³)")
                    .with_hint(format!("e.g. {density_default}"))
                    .with_default(density_default.to_string()),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("weight", "kg"),
            compute: Box::new(|v| {
                let d = v.require("D")?;
                let t = v.require("t")?;
                let len = v.require("L")?;
                let rho = v.require("rho")?;
                let di = d - 2.0 * t;
                if di < 0.0 {
                    return Ok(ComputeOutput::Invalid);
                }
                let area_mm2 = PI * (d * d - di * di) / 4.0;
                Ok(ComputeOutput::Number(weight_kg(area_mm2 * len, rho)))
            }),
        },
        Template {
            id: "w_pipe_dual",
            group: Group::Weight,
            title: "Pipe weight (wall or bore)".to_string(),
            description: "outer D, (wall t or inner Di), length L, material -> weight"
                .to_string(),
            tags: vec!["material select".to_string()],
            inputs: vec![
                InputField::numeric("D", "Outer diameter D (mm)").with_hint("e.g. 60.5"),
                InputField::numeric("t", "Wall thickness t (mm) - one of the two")
                    .with_hint("e.g. 3.2 (leave blank when entering Di)"),
                InputField::numeric("Di", "Inner diameter Di (mm) - one of the two")
                    .with_hint("e.g. 54.1 (leave blank when entering t)"),
                InputField::numeric("L", "Length L (mm)").with_hint("e.g. 1000"),
                InputField::select("mat", "Material", material_options(), "SS"),
            ],
            partial: true,
            max_inputs: None,
            result: ResultSpec::new("weight", "kg"),
            compute: Box::new(move |v| {
                let rho = density_for(v.choice("mat").unwrap_or("SS"), density_default);
                let (d, len) = match (v.num("D"), v.num("L")) {
                    (Some(d), Some(len)) => (d, len),
                    (d, len) => {
                        let mut missing = Vec::new();
                        if d.is_none() {
                            missing.push("D");
                        }
                        if len.is_none() {
                            missing.push("L");
                        }
                        return Err(CalcError::missing_inputs(missing));
                    }
                };

                let di = match (v.num("t"), v.num("Di")) {
                    (Some(t), None) => d - 2.0 * t,
                    (None, Some(di)) => di,
                    _ => {
                        return Err(CalcError::geometry(
                            "enter exactly one of wall thickness t or inner diameter Di",
                        ))
                    }
                };
                if !(di > 0.0) || di >= d {
                    return Err(CalcError::geometry(
                        "inner diameter must satisfy 0 < Di < D",
                    ));
                }

                let area_mm2 = PI * (d * d - di * di) / 4.0;
                Ok(ComputeOutput::Number(weight_kg(area_mm2 * len, rho)))
            }),
        },
        Template {
            id: "vol_box",
            group: Group::Weight,
            title: "Volume (box)".to_string(),
            description: "A x B x C (mm) -> mm³ / cm³ / L".to_string(),
            tags: vec!["volume".to_string()],
            inputs: vec![
                InputField::numeric("A", "A (mm)").with_hint("e.g. 100"),
                InputField::numeric("B", "B (mm)").with_hint("e.g. 50"),
                InputField::numeric("C", "C (mm)").with_hint("e.g. 30"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("volume", "mm³"),
            compute: Box::new(|v| {
                let mm3 = v.require("A")? * v.require("B")? * v.require("C")?;
                Ok(volume_output(mm3))
            }),
        },
        Template {
            id: "vol_cyl",
            group: Group::Weight,
            title: "Volume (cylinder)".to_string(),
            description: "diameter d x length L (mm) -> mm³ / cm³ / L".to_string(),
            tags: vec!["volume".to_string()],
            inputs: vec![
                InputField::numeric("d", "Diameter d (mm)").with_hint("e.g. 50"),
                InputField::numeric("L", "Length L (mm)").with_hint("e.g. 100"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("volume", "mm³"),
            compute: Box::new(|v| {
                let d = v.require("d")?;
                let len = v.require("L")?;
                Ok(volume_output(PI * d * d / 4.0 * len))
            }),
        },
    ]
}
