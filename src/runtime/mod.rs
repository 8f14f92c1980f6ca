pub mod interaction_loop;
pub mod replay;
