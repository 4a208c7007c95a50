//! Core types and utilities

pub mod colour;
pub mod units;
pub mod vec2;
pub mod weather;

pub use colour::Colour;
pub use units::{Degrees, Fahrenheit, MilesPerHour, Percent};
pub use vec2::{GridPoint, Vec2};
pub use weather::{WeatherCondition, WeatherData};
