pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod filter;
pub mod keyboard;
pub mod media;
pub mod navigation;
pub mod ordering;
pub mod platform;
pub mod timer;
pub mod video;
