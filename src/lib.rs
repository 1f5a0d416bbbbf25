// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scene-interaction and motion kernel for a small 3D model viewer.
//!
//! Orrery owns everything between raw pointer/keyboard input and the
//! per-object uniforms a renderer draws with: ray picking against
//! triangle meshes, an orbit camera with axis-locked rotation and a
//! top-down orthographic toggle, a virtual trackball for rotating the
//! selection, multiplicative scaling, and quadratic path motion through
//! points placed on a camera-facing plane.
//!
//! # Key entry points
//!
//! - [`Engine`] - owns the scene, camera and input processor; call
//!   [`Engine::advance`] once per frame
//! - [`Scene`] - flat entity storage with exclusive selection
//! - [`Options`] - TOML-backed configuration (camera, interaction,
//!   motion, display, key bindings)
//! - [`picking`] - CPU ray picking with bounding-sphere pruning
//!
//! # Frame order
//!
//! Input events become [`OrreryCommand`]s that queue on the engine. Each
//! frame applies the queue, refreshes dirty matrices, resolves picks
//! against those fresh matrices and finally steps path motion.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod input;
pub mod math;
pub mod mesh;
pub mod options;
pub mod picking;
pub mod render;
pub mod scene;
pub mod transform;

pub use camera::{OrbitController, RotationAxis, Trackball, ViewMode};
pub use engine::command::{EditMode, OrreryCommand};
pub use engine::{Engine, FrameReport};
pub use error::OrreryError;
pub use input::{InputEvent, InputProcessor, KeyAction, MouseButton};
pub use mesh::MeshGeometry;
pub use options::Options;
pub use scene::{Entity, EntityId, Scene};
pub use transform::Transform;
