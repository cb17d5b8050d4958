//! # fieldcalc_core - Shop-Floor Formula Engine
//!
//! `fieldcalc_core` is the computational heart of Fieldcalc: a curated
//! catalog of machining, weight, and coordinate formulas behind one uniform
//! evaluation contract. Front ends stay thin - they render input descriptors,
//! hand back raw text, and display the ordered result list they get in
//! return.
//!
//! ## Design Philosophy
//!
//! - **Stateless evaluation**: pure functions from an input snapshot to a
//!   result; the catalog is rebuilt from settings, never mutated in place
//! - **All-or-nothing results**: a result batch is either fully finite or
//!   wholly unavailable with a message, never mixed
//! - **Absence is not zero**: unparseable or empty input fields are absent,
//!   and templates decide what absence means
//! - **Rich errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldcalc_core::catalog::{build_templates, find};
//! use fieldcalc_core::eval::evaluate;
//! use fieldcalc_core::settings::Settings;
//! use fieldcalc_core::template::InputValues;
//!
//! let templates = build_templates(&Settings::default());
//! let template = find(&templates, "vc_rpm").unwrap();
//! let eval = evaluate(
//!     template,
//!     &InputValues::new().with_num("Vc", 150.0).with_num("D", 50.0),
//! );
//! assert!(eval.is_complete());
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - The built-in template catalog, grouped and ordered
//! - [`template`] - Template and input-field descriptors, parsed input values
//! - [`eval`] - Evaluation contract: sufficiency policies and normalization
//! - [`solver`] - Right-triangle partial solver
//! - [`numeric`] - Lenient parsing and display formatting
//! - [`settings`] - User-tunable settings
//! - [`history`] - Capped, newest-first calculation history
//! - [`store`] - Persistent state file with atomic saves
//! - [`errors`] - Structured error types

pub mod catalog;
pub mod errors;
pub mod eval;
pub mod history;
pub mod numeric;
pub mod settings;
pub mod solver;
pub mod store;
pub mod template;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use eval::{evaluate, EvalStatus, Evaluation};
pub use settings::Settings;
pub use store::{load_or_default, save_state, StateFile};
pub use template::{InputValues, Template};
