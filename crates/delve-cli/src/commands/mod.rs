pub mod config;
pub mod doctor;
pub mod pop;
pub mod queue;
pub mod research;
