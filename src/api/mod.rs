/// API module for crowdlex
///
/// The store and the premium cache only ever see the traits defined here, so the
/// HTTP transport can be swapped for an in-memory double in tests.
///
/// # Architecture
///
/// - `client` - `ChatApi` contract, endpoint schemas and `ApiError`
/// - `http` - `reqwest` implementation of `ChatApi`
/// - `collaborators` - auth and payment hooks consumed at startup
mod client;
mod collaborators;
mod http;

pub use client::{
    Ack, ApiError, ApiResult, ChatApi, ChatReply, PremiumStatusResponse, SessionHistory,
    SessionList,
};
pub use collaborators::{AuthProvider, NoPayments, PaymentService, StaticAuth};
pub use http::HttpApi;
