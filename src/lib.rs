// Terminal rendition of a personal landing page: a music player, a
// background video carousel and a handful of links.

pub mod cache;
pub mod config;
pub mod error;
pub mod player;
pub mod ui;
