//! `npc-behavior` — what an NPC does, independent of how it is replicated.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`action`]    | `Action`, `ActionKind`, pure `advance`                         |
//! | [`template`]  | `ActionTemplate`, `WeightedAction`, `Span`, `FacingRule`       |
//! | [`selector`]  | `ActionSelector` (weighted draw), `SelectContext`, roam heading |
//! | [`model`]     | `BehaviorModel` trait                                          |
//! | [`config`]    | `BehaviorConfig` + bartender / pig / wanderer presets          |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Design notes
//!
//! Actions are plain tagged values, not closures: every random parameter is
//! drawn once by [`instantiate`] and stored in the variant, and [`advance`]
//! maps `(action, view, delta)` to the next action plus the effects to apply.
//! This keeps individual actions inspectable and testable without a
//! scheduler, controller, or channel.

pub mod action;
pub mod config;
pub mod error;
pub mod model;
pub mod selector;
pub mod template;


pub use action::{ARRIVE_DISTANCE, Action, ActionKind, Advance, AgentView, GROUND_BIAS, advance};
pub use config::BehaviorConfig;
pub use error::{BehaviorError, BehaviorResult};
pub use model::BehaviorModel;
pub use selector::{ActionSelector, HOMING_CONE, SelectContext, instantiate, roam_heading};
pub use template::{ActionTemplate, FacingRule, Span, WeightedAction};
