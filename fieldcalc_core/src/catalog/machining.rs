//! # Machining Templates
//!
//! Cutting speed, feed, cycle time, and tap-drill helpers. All single
//! closed-form expressions; the only guarded one is the fz back-calculation,
//! which refuses zero tooth counts and spindle speeds.

use std::f64::consts::PI;

use crate::errors::CalcError;
use crate::settings::Settings;
use crate::template::{ComputeOutput, Group, InputField, ResultSpec, Template};

pub fn build_machining_templates(_settings: &Settings) -> Vec<Template> {
    vec![
        Template {
            id: "vc_rpm",
            group: Group::Machining,
            title: "Cutting speed to rpm".to_string(),
            description: "Vc (m/min), diameter D (mm) -> rpm".to_string(),
            tags: vec!["lathe/mill".to_string()],
            inputs: vec![
                InputField::numeric("Vc", "Cutting speed Vc (m/min)").with_hint("e.g. 150"),
                InputField::numeric("D", "Diameter D (mm)").with_hint("e.g. 50"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("spindle speed", "rpm"),
            compute: Box::new(|v| {
                Ok(ComputeOutput::Number(
                    1000.0 * v.require("Vc")? / (PI * v.require("D")?),
                ))
            }),
        },
        Template {
            id: "feed_rev",
            group: Group::Machining,
            title: "Feed per rev to feed rate".to_string(),
            description: "f (mm/rev), rpm -> F (mm/min)".to_string(),
            tags: vec!["lathe/drill".to_string()],
            inputs: vec![
                InputField::numeric("f", "Feed f (mm/rev)").with_hint("e.g. 0.2"),
                InputField::numeric("rpm", "Spindle speed (rpm)").with_hint("e.g. 900"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("feed rate", "mm/min"),
            compute: Box::new(|v| {
                Ok(ComputeOutput::Number(v.require("f")? * v.require("rpm")?))
            }),
        },
        Template {
            id: "feed_fz",
            group: Group::Machining,
            title: "Feed rate (fz x teeth x rpm)".to_string(),
            description: "F (mm/min) = fz (mm/tooth) x z x rpm".to_string(),
            tags: vec!["mill".to_string()],
            inputs: vec![
                InputField::numeric("fz", "fz (mm/tooth)").with_hint("e.g. 0.08"),
                InputField::numeric("z", "Tooth count z").with_hint("e.g. 4"),
                InputField::numeric("rpm", "Spindle speed (rpm)").with_hint("e.g. 1200"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("feed rate", "mm/min"),
            compute: Box::new(|v| {
                Ok(ComputeOutput::Number(
                    v.require("fz")? * v.require("z")? * v.require("rpm")?,
                ))
            }),
        },
        Template {
            id: "fz_from_feed",
            group: Group::Machining,
            title: "fz back-calculation".to_string(),
            description: "fz (mm/tooth) = F (mm/min) / (z x rpm)".to_string(),
            tags: vec!["mill".to_string(), "back-calc".to_string()],
            inputs: vec![
                InputField::numeric("z", "Tooth count z").with_hint("e.g. 4"),
                InputField::numeric("rpm", "Spindle speed (rpm)").with_hint("e.g. 1200"),
                InputField::numeric("F", "Feed rate F (mm/min)").with_hint("e.g. 384"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("fz", "mm/tooth"),
            compute: Box::new(|v| {
                let z = v.require("z")?;
                let rpm = v.require("rpm")?;
                let feed = v.require("F")?;
                if z <= 0.0 {
                    return Err(CalcError::invalid_input(
                        "z",
                        z.to_string(),
                        "tooth count must be greater than zero",
                    ));
                }
                if rpm <= 0.0 {
                    return Err(CalcError::invalid_input(
                        "rpm",
                        rpm.to_string(),
                        "spindle speed must be greater than zero",
                    ));
                }
                if feed < 0.0 {
                    return Err(CalcError::invalid_input(
                        "F",
                        feed.to_string(),
                        "feed rate cannot be negative",
                    ));
                }
                Ok(ComputeOutput::Number(feed / (z * rpm)))
            }),
        },
        Template {
            id: "time_from_feed",
            group: Group::Machining,
            title: "Machining time (by feed)".to_string(),
            description: "distance (mm) / feed rate (mm/min) -> minutes".to_string(),
            tags: vec!["estimate".to_string()],
            inputs: vec![
                InputField::numeric("dist", "Distance (mm)").with_hint("e.g. 300"),
                InputField::numeric("F", "Feed rate (mm/min)").with_hint("e.g. 180"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("time", "min"),
            compute: Box::new(|v| {
                Ok(ComputeOutput::Number(v.require("dist")? / v.require("F")?))
            }),
        },
        Template {
            id: "tap_drill",
            group: Group::Machining,
            title: "Tap drill (rule of thumb)".to_string(),
            description: "drill ≈ nominal diameter - pitch".to_string(),
            tags: vec!["estimate".to_string()],
            inputs: vec![
                InputField::numeric("nom", "Nominal diameter (mm)").with_hint("e.g. 6 (M6)"),
                InputField::numeric("pitch", "Pitch (mm)").with_hint("e.g. 1.0 (M6x1.0)"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("drill diameter", "mm"),
            compute: Box::new(|v| {
                Ok(ComputeOutput::Number(v.require("nom")? - v.require("pitch")?))
            }),
        },
        Template {
            id: "circumference",
            group: Group::Machining,
            title: "Circumference (mm)".to_string(),
            description: "diameter D (mm) -> circumference".to_string(),
            tags: vec!["layout/piping".to_string()],
            inputs: vec![InputField::numeric("D", "Diameter D (mm)").with_hint("e.g. 100")],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("circumference", "mm"),
            compute: Box::new(|v| Ok(ComputeOutput::Number(PI * v.require("D")?))),
        },
    ]
}
