// extensions/mod.rs
//
// Optional extension modules for the orrery engine.
// These are decoupled from core Entity/Scene; games opt in by using them.

pub mod transform;

pub use transform::{TransformGraph, LocalTransform};
