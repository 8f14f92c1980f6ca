pub mod events;
pub mod geometry;
pub mod landmarks;
pub mod recording;
pub mod settings;
