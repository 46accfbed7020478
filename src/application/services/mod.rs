//! Business logic services for the application layer.

pub mod weather_facade;

pub use weather_facade::WeatherFacade;
