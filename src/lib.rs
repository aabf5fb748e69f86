//! grug is a static template renderer.
//! It renders every template under an input directory to the same relative
//! path under an output directory, with a directory of shared include
//! templates available to all of them.

/// Command-line interface module for grug
pub mod cli;

/// Run configuration resolved from the command line
pub mod config;

/// Recursive template discovery with ignored subtrees
pub mod discover;

/// Error types and handling for grug
pub mod error;

/// Helper functions callable from templates (`mkSlice`, `mkMap`)
pub mod helpers;

/// Logging setup
pub mod logger;

/// Segment-wise path matching and rebasing
pub mod paths;

/// Discovery, template set composition and the render loop
pub mod pipeline;

/// Rendering of one template to its output file
pub mod renderer;

/// Parsed templates keyed by logical name
pub mod template_set;
