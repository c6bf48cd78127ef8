pub mod handlers;
pub mod pages;
pub mod routes;
pub mod thumbnails;
pub mod videos;

pub use routes::create_router;
