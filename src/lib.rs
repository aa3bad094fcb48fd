//! Browser binding of the Mizuki lightbox.
//!
//! Loading the module binds delegated listeners on the document, so any
//! element carrying `data-lightbox-src` opens the viewer, including content
//! swapped in later by client-side navigation.

use wasm_bindgen::prelude::*;

mod config;
mod dom;
mod error;
mod input;
mod lightbox;
mod renderer;
mod surface;
mod trigger;

use lightbox::Lightbox;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    match input::bind_once() {
        Ok(true) => gloo::console::log!("lightbox: listeners bound"),
        Ok(false) => {}
        Err(err) => {
            gloo::console::warn!(format!("lightbox: binding failed: {err}"));
            return;
        }
    }
    error::report("startup", input::when_ready(reinit));
}

/// Re-verifies that the overlay exists, rebuilding it after the page body
/// was replaced.
#[wasm_bindgen]
pub fn reinit() {
    error::report("reinit", Lightbox::shared().ensure_surface().map(drop));
}

#[wasm_bindgen]
pub fn close() {
    lightbox::close_shared();
}
