pub mod relay;
pub mod storage;
pub mod utils;
