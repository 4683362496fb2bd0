pub use sensor::{ClientError, SensorClient};

pub mod sensor;
