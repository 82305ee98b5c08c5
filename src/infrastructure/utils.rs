pub mod clock;
pub mod email;
pub mod ids;
pub mod tags;
