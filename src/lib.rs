pub mod beatmap;
pub mod config;
pub mod contact;
pub mod hit_objects;
pub mod math;
pub mod processor;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod timer;
