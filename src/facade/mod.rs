pub mod climate_api;
pub mod query_response;
pub mod route;
