pub mod renderer;
pub mod terrain;
pub mod ui;
