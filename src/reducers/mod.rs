pub mod canvas;
pub mod project;
