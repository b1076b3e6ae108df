pub mod gateway;
pub mod locks;
pub mod ranking;
pub mod scoring;
pub mod standings;
