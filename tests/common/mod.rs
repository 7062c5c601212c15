pub mod network;
pub mod synthetic_image;
