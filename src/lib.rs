pub mod assets;
pub mod compute;
pub mod config;
pub mod entities;
pub mod hostiles;
pub mod input;
pub mod level;
pub mod mask;
pub mod surface;
pub mod tilemap;
