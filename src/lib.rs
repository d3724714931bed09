pub mod conf;
pub mod core;
pub mod fits;
pub mod table;

#[cfg(feature = "testutil")]
pub mod testutil;
