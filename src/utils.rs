/// Route Rust panics to the browser console. Only compiled in with the
/// `debug` feature; otherwise a no-op.
pub fn set_panic_hook() {
    #[cfg(feature = "debug")]
    console_error_panic_hook::set_once();
}
