pub mod app;
pub mod marquee;
