#![allow(dead_code)]

pub mod db;
pub mod fixtures;
pub mod logging;
pub mod platform;

// Logging is auto-installed for every test binary that pulls in support.
#[ctor::ctor]
fn init_logging() {
    logging::init();
}
