// Routes `log` records to the browser console, plus a console.time based timer
// for profiling frames.

use log::{Level, LevelFilter};
use web_sys::console;

/// Installs the console logger at `warn`. A logger installed earlier by the
/// host page's own wasm code wins; that is not an error.
pub fn init() {
    if console_log::init_with_level(Level::Warn).is_err() {
        log::debug!("a logger is already installed");
    }
}

pub fn set_level(level: &str) -> Result<LevelFilter, log::ParseLevelError> {
    let filter = level.parse::<LevelFilter>()?;
    log::set_max_level(filter);
    Ok(filter)
}

/// Times its own lifetime with console.time/console.timeEnd.
pub struct FrameTimer<'a> {
    label: &'a str,
}

impl<'a> FrameTimer<'a> {
    pub fn new(label: &'a str) -> FrameTimer<'a> {
        console::time_with_label(label);
        FrameTimer { label }
    }
}

impl<'a> Drop for FrameTimer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names() {
        assert_eq!(set_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(set_level("WARN").unwrap(), LevelFilter::Warn);
        assert!(set_level("loud").is_err());
        assert_eq!(log::max_level(), LevelFilter::Warn);
    }
}
