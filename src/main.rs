#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod contact;
#[cfg(target_arch = "wasm32")]
mod frontend;
mod nav;
mod progress;
mod reveal;
mod scene;
#[cfg(target_arch = "wasm32")]
mod three;
mod typewriter;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
