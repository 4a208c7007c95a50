//! Particle kinematics, snow accumulation and lightning generation

pub mod accumulation;
pub mod lightning;
pub mod particle;
pub mod system;

pub use accumulation::AccumulationField;
pub use lightning::{BoltConfig, LightningBolt};
pub use particle::{Drift, Particle};
pub use system::{Bounds, ParticleSystem};
