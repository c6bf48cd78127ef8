pub mod api;
pub mod startup;
pub mod state;
