//! Performance point calculation for osu! score records.
//!
//! Instead of computing difficulty from `.osu` files, this crate combines a
//! score record as delivered by the osu! API with precomputed difficulty
//! attributes and evaluates the performance points of all four rulesets.
//!
//! ### Usage
//!
//! ```
//! use inspector_pp::{any::HitResult, ScoreAggregate};
//!
//! let score = r#"{
//!     "ruleset_id": 0,
//!     "mods": ["HD", "DT"],
//!     "statistics": { "great": 780, "ok": 15, "meh": 2, "miss": 3, "slider_tail_hit": 190 },
//!     "max_combo": 650,
//!     "build_id": 7500,
//!     "beatmap": {
//!         "mode": "osu",
//!         "ar": 9,
//!         "cs": 4,
//!         "accuracy": 8,
//!         "drain": 6,
//!         "count_circles": 600,
//!         "count_sliders": 200,
//!         "count_spinners": 0,
//!         "max_combo": 1000
//!     }
//! }"#;
//!
//! let attrs = r#"{
//!     "star_rating": 7.1,
//!     "max_combo": 1000,
//!     "aim_difficulty": 3.4,
//!     "speed_difficulty": 3.1,
//!     "speed_note_count": 420.0,
//!     "slider_factor": 0.98,
//!     "aim_difficult_slider_count": 40.0,
//!     "aim_difficult_strain_count": 180.0,
//!     "speed_difficult_strain_count": 140.0
//! }"#;
//!
//! let aggregate = ScoreAggregate::from_json(score, Some(attrs)).unwrap();
//!
//! // The score as it was set
//! let actual = aggregate.performance().calculate();
//!
//! // The same score without misses
//! let if_fc = aggregate
//!     .performance()
//!     .statistics(*aggregate.full_combo_statistics())
//!     .calculate();
//!
//! assert_eq!(aggregate.statistics().get(HitResult::Miss), 3);
//! assert!(actual.pp() > 0.0);
//! assert!(if_fc.pp() >= actual.pp());
//! ```
//!
//! ### Mods
//!
//! Mods are tracked by acronym in a [`ModState`]. Whether a mod combination
//! is legal can be checked against a mod definition table, see
//! [`ModTable`](model::mods::ModTable).
//!
//! ### Logging
//!
//! Noteworthy events such as missing difficulty attributes or non-finite
//! intermediate values are emitted through [`tracing`].

#![deny(rustdoc::broken_intra_doc_links, rustdoc::missing_crate_level_docs)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::similar_names,
    clippy::unreadable_literal
)]

#[doc(inline)]
pub use self::{
    any::{Performance, PerformanceAttributes, ScoreAggregate},
    error::{InvalidModCombination, PerformanceError},
    model::{beatmap::Beatmap, mods::ModState},
    util::special_functions::{erf, erf_inv, erfc},
};

/// Types for calculations of any mode.
pub mod any;

/// Types for osu!standard calculations.
pub mod osu;

/// Types for osu!taiko calculations.
pub mod taiko;

/// Types for osu!catch calculations.
pub mod catch;

/// Types for osu!mania calculations.
pub mod mania;

/// Types used in and around this crate.
pub mod model;

mod error;
mod util;
