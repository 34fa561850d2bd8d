pub mod dtos;
pub mod geo_point;
pub mod place;
pub mod place_category;
pub mod route;
pub mod session;
pub mod trip;
