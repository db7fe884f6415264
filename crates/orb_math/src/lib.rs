//! Vector math for orb.
//!
//! `Vec3` and friends come straight from glam. Every operation the
//! ray caster needs (add, subtract, scale, dot, cross, normalize) is a
//! glam operator or method returning a new value.

// Re-export glam for convenience
pub use glam::*;

// orb math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;
