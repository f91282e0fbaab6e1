//! Wasm entry point: sets up panic reporting and console logging, then mounts
//! every page feature whose markup is present.

use page_behavior::config::PageConfig;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

    match page_behavior::mount(&PageConfig::default()) {
        Ok(report) => log::debug!("Mount report: {:?}", report),
        Err(e) => log::error!("Page behavior failed to mount: {}", e),
    }
}
