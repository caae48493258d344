pub mod post_services;
pub mod rate_limit;
pub mod validation;
