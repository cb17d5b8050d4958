//! # Coordinate & Layout Templates
//!
//! Right-triangle solving, point-to-point distance/angle, rotation, bolt
//! circle (PCD) positions, arcs, and the J-groove tangent-point layout.
//!
//! `tri_right` is the one bounded-partial template in the catalog: it takes
//! any three of (a, b, c, θ) and solves for the fourth via
//! [`solve_right_triangle`].

use std::f64::consts::PI;

use crate::errors::CalcError;
use crate::numeric::{deg_to_rad, rad_to_deg};
use crate::settings::Settings;
use crate::solver::solve_right_triangle;
use crate::template::{ComputeOutput, Group, InputField, ResultSpec, ResultValue, Template};

pub fn build_coordinate_templates(_settings: &Settings) -> Vec<Template> {
    vec![
        Template {
            id: "tri_right",
            group: Group::Coordinates,
            title: "Right triangle (enter any 3)".to_string(),
            description: "Sides a, b, hypotenuse c, angle θ at the a/c corner; \
                          supply any three and the fourth is solved"
                .to_string(),
            tags: vec!["taper".to_string(), "chamfer".to_string()],
            inputs: vec![
                InputField::numeric("a", "Adjacent side a (mm)"),
                InputField::numeric("b", "Opposite side b (mm)"),
                InputField::numeric("c", "Hypotenuse c (mm)"),
                InputField::numeric("theta", "Angle θ (deg)"),
            ],
            partial: true,
            max_inputs: Some(3),
            result: ResultSpec::new("a", "mm"),
            compute: Box::new(|v| {
                let t = solve_right_triangle(v.num("a"), v.num("b"), v.num("c"), v.num("theta"))?;
                Ok(ComputeOutput::PrimaryWithOthers {
                    primary: ResultValue::new("a", t.a, "mm"),
                    others: vec![
                        ResultValue::new("b", t.b, "mm"),
                        ResultValue::new("c", t.c, "mm"),
                        ResultValue::new("θ", t.theta_deg, "deg"),
                    ],
                })
            }),
        },
        Template {
            id: "coord_dist",
            group: Group::Coordinates,
            title: "Distance between two points".to_string(),
            description: "√(dx² + dy²) from (x1, y1) to (x2, y2)".to_string(),
            tags: vec!["layout".to_string()],
            inputs: vec![
                InputField::numeric("x1", "x1 (mm)").with_default("0"),
                InputField::numeric("y1", "y1 (mm)").with_default("0"),
                InputField::numeric("x2", "x2 (mm)"),
                InputField::numeric("y2", "y2 (mm)"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("distance", "mm"),
            compute: Box::new(|v| {
                let dx = v.require("x2")? - v.require("x1")?;
                let dy = v.require("y2")? - v.require("y1")?;
                Ok(ComputeOutput::Number(dx.hypot(dy)))
            }),
        },
        Template {
            id: "coord_angle",
            group: Group::Coordinates,
            title: "Angle between two points".to_string(),
            description: "atan2(dy, dx) in degrees, measured from +X CCW".to_string(),
            tags: vec!["layout".to_string()],
            inputs: vec![
                InputField::numeric("x1", "x1 (mm)").with_default("0"),
                InputField::numeric("y1", "y1 (mm)").with_default("0"),
                InputField::numeric("x2", "x2 (mm)"),
                InputField::numeric("y2", "y2 (mm)"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("angle", "deg"),
            compute: Box::new(|v| {
                let dx = v.require("x2")? - v.require("x1")?;
                let dy = v.require("y2")? - v.require("y1")?;
                Ok(ComputeOutput::Number(rad_to_deg(dy.atan2(dx))))
            }),
        },
        Template {
            id: "coord_rotate",
            group: Group::Coordinates,
            title: "Rotate a point about the origin".to_string(),
            description: "(x, y) rotated by θ degrees CCW".to_string(),
            tags: vec!["layout".to_string()],
            inputs: vec![
                InputField::numeric("x", "x (mm)"),
                InputField::numeric("y", "y (mm)"),
                InputField::numeric("theta", "Rotation θ (deg)"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("x'", "mm"),
            compute: Box::new(|v| {
                let x = v.require("x")?;
                let y = v.require("y")?;
                let t = deg_to_rad(v.require("theta")?);
                let (s, c) = t.sin_cos();
                Ok(ComputeOutput::ValueWithExtras {
                    value: x * c - y * s,
                    extras: vec![ResultValue::new("y'", x * s + y * c, "mm")],
                })
            }),
        },
        Template {
            id: "pcd_xy",
            group: Group::Coordinates,
            title: "Bolt circle position (PCD)".to_string(),
            description: "X/Y of a hole on a pitch circle, angle from +X CCW".to_string(),
            tags: vec!["bolt circle".to_string(), "drilling".to_string()],
            inputs: vec![
                InputField::numeric("pcd", "Pitch circle diameter (mm)").with_hint("e.g. 120"),
                InputField::numeric("theta", "Hole angle θ (deg)"),
                InputField::numeric("cx", "Center X (mm)").with_default("0"),
                InputField::numeric("cy", "Center Y (mm)").with_default("0"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("X", "mm"),
            compute: Box::new(|v| {
                let r = v.require("pcd")? / 2.0;
                let t = deg_to_rad(v.require("theta")?);
                let x = v.require("cx")? + r * t.cos();
                let y = v.require("cy")? + r * t.sin();
                Ok(ComputeOutput::PrimaryWithOthers {
                    primary: ResultValue::new("X", x, "mm"),
                    others: vec![ResultValue::new("Y", y, "mm")],
                })
            }),
        },
        Template {
            id: "circ_arc",
            group: Group::Coordinates,
            title: "Circumference and arc length".to_string(),
            description: "C = πD, arc = C x (angle / 360)".to_string(),
            tags: vec!["layout".to_string(), "bending".to_string()],
            inputs: vec![
                InputField::numeric("D", "Diameter D (mm)").with_hint("e.g. 100"),
                InputField::numeric("angle", "Arc angle (deg)").with_default("360"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("circumference", "mm"),
            compute: Box::new(|v| {
                let circ = PI * v.require("D")?;
                let arc = circ * (v.require("angle")? / 360.0);
                Ok(ComputeOutput::PrimaryWithOthers {
                    primary: ResultValue::new("circumference", circ, "mm"),
                    others: vec![ResultValue::new("arc length", arc, "mm")],
                })
            }),
        },
        Template {
            id: "j_groove_xy",
            group: Group::Coordinates,
            title: "J-groove tangent point".to_string(),
            description: "Tangent point of a J-prep groove radius R against a \
                          bevel of half-angle α, with root gap offset RG"
                .to_string(),
            tags: vec!["welding".to_string(), "groove".to_string()],
            inputs: vec![
                InputField::numeric("alpha", "Bevel half-angle α (deg)").with_default("30"),
                InputField::numeric("R", "Groove radius R (mm)").with_default("5"),
                InputField::numeric("RG", "Root offset RG (mm)").with_default("11.55"),
            ],
            partial: false,
            max_inputs: None,
            result: ResultSpec::new("X (tangent)", "mm"),
            compute: Box::new(|v| {
                let alpha = v.require("alpha")?;
                let r = v.require("R")?;
                let rg = v.require("RG")?;
                if r <= 0.0 {
                    return Err(CalcError::invalid_input(
                        "R",
                        r.to_string(),
                        "groove radius must be greater than zero",
                    ));
                }
                if rg < 0.0 {
                    return Err(CalcError::invalid_input(
                        "RG",
                        rg.to_string(),
                        "root offset cannot be negative",
                    ));
                }
                if !(alpha > 0.0 && alpha < 89.999) {
                    return Err(CalcError::invalid_input(
                        "alpha",
                        alpha.to_string(),
                        "half-angle must be between 0 and 90 degrees (exclusive)",
                    ));
                }
                let a = deg_to_rad(alpha);
                let (s, c) = a.sin_cos();
                if s.abs() < 1e-12 {
                    return Err(CalcError::geometry("sin α is too close to zero"));
                }
                // TODO: re-derive this tangent-point construction against a CAD
                // sketch; values are carried over from the shop's worksheet.
                let cy = -(r + rg * c) / s;
                let x = -rg - r * c;
                let y = cy + r * s;
                let y_bottom = cy - r;
                let h = -y;
                Ok(ComputeOutput::PrimaryWithOthers {
                    primary: ResultValue::new("X (tangent)", x, "mm"),
                    others: vec![
                        ResultValue::new("Y (tangent)", y, "mm"),
                        ResultValue::new("H (top to tangent)", h, "mm"),
                        ResultValue::new("center Y", cy, "mm"),
                        ResultValue::new("Y bottom (reference)", y_bottom, "mm"),
                    ],
                })
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{evaluate, EvalStatus};
    use crate::template::InputValues;

    fn get<'a>(templates: &'a [Template], id: &str) -> &'a Template {
        templates.iter().find(|t| t.id == id).unwrap()
    }

    fn templates() -> Vec<Template> {
        build_coordinate_templates(&Settings::default())
    }

    #[test]
    fn test_distance_and_angle_scenario() {
        // (0,0) to (100,50): distance ~111.803 mm, angle ~26.565 deg
        let ts = templates();
        let inputs = InputValues::new()
            .with_num("x1", 0.0)
            .with_num("y1", 0.0)
            .with_num("x2", 100.0)
            .with_num("y2", 50.0);
        let dist = evaluate(get(&ts, "coord_dist"), &inputs);
        assert!((dist.values[0].value - 111.80339887).abs() < 1e-6);
        let angle = evaluate(get(&ts, "coord_angle"), &inputs);
        assert!((angle.values[0].value - 26.56505118).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_awaits_until_three_inputs() {
        let ts = templates();
        let t = get(&ts, "tri_right");
        let eval = evaluate(t, &InputValues::new().with_num("a", 100.0).with_num("b", 50.0));
        assert_eq!(eval.status, EvalStatus::AwaitingInput { needed: 1 });
        assert!(!eval.is_complete());
    }

    #[test]
    fn test_triangle_solves_from_two_sides_and_angle_slot() {
        let ts = templates();
        let t = get(&ts, "tri_right");
        let eval = evaluate(
            t,
            &InputValues::new()
                .with_num("a", 100.0)
                .with_num("b", 50.0)
                .with_num("theta", 26.56505117707799),
        );
        assert!(eval.is_complete());
        // primary is a, then b, c, θ
        assert!((eval.values[0].value - 100.0).abs() < 1e-9);
        assert!((eval.values[2].value - 111.80339887).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_oversupply_message() {
        let ts = templates();
        let t = get(&ts, "tri_right");
        let eval = evaluate(
            t,
            &InputValues::new()
                .with_num("a", 100.0)
                .with_num("b", 50.0)
                .with_num("c", 111.80339887)
                .with_num("theta", 26.565),
        );
        // all four supplied: the solver refuses, and the status explains the cap
        assert!(!eval.is_complete());
        assert!(eval.message().unwrap().contains("exactly 3"));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let ts = templates();
        let eval = evaluate(
            get(&ts, "coord_rotate"),
            &InputValues::new()
                .with_num("x", 10.0)
                .with_num("y", 0.0)
                .with_num("theta", 90.0),
        );
        assert!(eval.values[0].value.abs() < 1e-9); // x'
        assert!((eval.values[1].value - 10.0).abs() < 1e-9); // y'
    }

    #[test]
    fn test_pcd_first_hole_on_x_axis() {
        let ts = templates();
        let eval = evaluate(
            get(&ts, "pcd_xy"),
            &InputValues::new()
                .with_num("pcd", 120.0)
                .with_num("theta", 0.0)
                .with_num("cx", 0.0)
                .with_num("cy", 0.0),
        );
        assert!((eval.values[0].value - 60.0).abs() < 1e-9);
        assert!(eval.values[1].value.abs() < 1e-9);
    }

    #[test]
    fn test_arc_length_is_fraction_of_circumference() {
        let ts = templates();
        let eval = evaluate(
            get(&ts, "circ_arc"),
            &InputValues::new().with_num("D", 100.0).with_num("angle", 90.0),
        );
        let circ = eval.values[0].value;
        let arc = eval.values[1].value;
        assert!((circ - PI * 100.0).abs() < 1e-9);
        assert!((arc - circ / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_j_groove_worksheet_values() {
        // α=30, R=5, RG=11.55 from the worksheet defaults
        let ts = templates();
        let eval = evaluate(
            get(&ts, "j_groove_xy"),
            &InputValues::new()
                .with_num("alpha", 30.0)
                .with_num("R", 5.0)
                .with_num("RG", 11.55),
        );
        assert!(eval.is_complete());
        assert!((eval.values[0].value - (-15.8804)).abs() < 1e-3); // X
        assert!((eval.values[3].value - (-30.00518)).abs() < 1e-3); // center Y
        assert!((eval.values[1].value - (-27.50518)).abs() < 1e-3); // Y tangent
        assert!((eval.values[2].value - 27.50518).abs() < 1e-3); // H
    }

    #[test]
    fn test_j_groove_rejects_flat_angle() {
        let ts = templates();
        let eval = evaluate(
            get(&ts, "j_groove_xy"),
            &InputValues::new()
                .with_num("alpha", 90.0)
                .with_num("R", 5.0)
                .with_num("RG", 11.55),
        );
        assert!(!eval.is_complete());
        assert!(eval.message().unwrap().contains("half-angle"));
    }
}
