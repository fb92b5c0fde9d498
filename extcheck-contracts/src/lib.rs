//! Request, response and broadcast contracts shared by the extcheck server
//! and its clients.

pub mod events;
pub mod extensions;
pub mod responses;
pub mod routes;

pub use events::ExtensionBroadcast;
pub use extensions::{
    AddCustomExtensionQuery, ExtensionListResponse, ExtensionResponse,
    FixedBatchRequest,
};
pub use responses::{ApiErrorResponse, ApiResponse};
