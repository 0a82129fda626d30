use std::env;

fn main() {
    let target = env::var("TARGET").unwrap_or_default();

    // WASM: search recursion depth is unbounded (combo chains freeze the depth
    // counter), so give the module a larger stack than the 1MB default.
    if target.contains("wasm32") {
        println!("cargo:rustc-link-arg=-zstack-size=4194304");
    }
}
