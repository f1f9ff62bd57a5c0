pub mod probe;
pub mod request;
pub mod result;

use std::fmt::Write;

pub mod prelude {
    pub use super::probe::send_probe;
    pub use super::report;
    pub use super::request::ProbeRequest;
    pub use super::result::ProbeResult;
}

/// Render an error together with its whole `source()` chain.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, "\n\nCaused by: {}", src);
        err = src;
    }
    s
}
