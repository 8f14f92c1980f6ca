pub mod coordinate_mapper;
pub mod drag_controller;
pub mod hand_scale;
pub mod pinch;
pub mod point_smoother;
pub mod scroll_velocity;
