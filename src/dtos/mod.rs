pub mod post_dtos;
pub mod rpc_dtos;
// alias so callers can write `crate::dtos::rpc::ApiResponse`
pub use rpc_dtos as rpc;
