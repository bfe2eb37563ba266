// Adapters layer: concrete implementations for external systems.

pub mod rest;

pub use self::rest::RestScheduleBackend;
