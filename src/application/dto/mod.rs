//! Data Transfer Objects
//!
//! Request and response bodies exchanged with the backend.

pub mod request;
pub mod response;

pub use request::{
    BatchRequest, GenerateCodesRequest, LoginRequest, MotherImportRequest, MotherInput,
    RedeemRequest,
};
pub use response::{
    Ack, BatchItemError, BatchResult, GeneratedCodes, RedeemResponse, RedeemStatus, SessionInfo,
    SupportedBatchActions,
};
