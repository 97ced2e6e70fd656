pub mod ddb;
pub mod events;
pub mod memory;
pub mod sns;
pub mod factory;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum GatewayPublisherVia {
    Sns,
    LocalDynamoDB,
    Memory,
}
