// THEORY:
// This file is the main entry point for the `region_match` library crate. It decides
// whether two screen regions show "the same visual state" by reducing each region to a
// small colour/texture fingerprint and scoring fingerprints against each other.
//
// The `pipeline` module is the clean, high-level interface: it re-exports the value
// types and exposes every stage as a plain function. `parallel_pipeline` adds an
// optional worker pool for running many independent searches at once. The stages
// themselves live in `core_modules`, leaf-first:
//
//   pixel → chunk → grid_sampler → color_space → similarity → reference_pattern → area_search
//
// Screenshot capture, the automation condition tree, input control and any messaging
// between processes are deliberately absent; they feed bitmaps and regions in and carry
// verdicts out.

pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;
