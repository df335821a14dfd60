// Library crate: scene store, CAD import and renderer mirror, exposed for
// integration tests and the line-oriented command interface in the binary.

pub mod cad;
pub mod command;
pub mod fixtures;
pub mod geometry;
pub mod harness;
pub mod state;
pub mod sync;
pub mod validation;

/// Renderer-side mesh buffers built from object dimensions.
pub mod viewport {
    pub mod mesh;
}
