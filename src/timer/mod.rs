pub mod controller;

pub use controller::CycleController;
