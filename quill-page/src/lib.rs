// Library interface for quill-page
pub mod api;
pub mod config;
pub mod controller;
pub mod dom;

#[macro_use]
pub mod logging;

pub mod render;
