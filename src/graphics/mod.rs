pub mod debug;
pub mod opengl;
pub mod utils;
