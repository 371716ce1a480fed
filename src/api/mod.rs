pub mod attendance;
pub mod directory;
pub mod maps;
pub mod status;
