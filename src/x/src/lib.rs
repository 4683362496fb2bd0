pub mod rpc;
pub mod sensor;

pub use rpc::{EnvelopeError, RpcError, RpcErrorKind, RpcRequest, RpcResponse};
pub use sensor::{SensorInfo, SensorInfoError, SensorMethod};
