pub mod addon;
pub mod install;
pub mod proxy;
pub mod status;
