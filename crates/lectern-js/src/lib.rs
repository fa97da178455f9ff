//! WASM bindings for the lectern inline toolbar.
//!
//! Provides the embeddable toolbar and slide parsing for JavaScript/TypeScript apps.

mod editor;
mod slides;
mod types;

pub use editor::*;
pub use slides::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize the panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::filter::Targets;
    use tracing_subscriber::layer::SubscriberExt;

    console_error_panic_hook::set_once();

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // Element-by-element serialization traces are noisy.
    let filter = Targets::new()
        .with_default(console_level)
        .with_target("lectern::serialize", Level::INFO);

    let reg = Registry::default().with(filter).with(wasm_layer);

    // The host page may have installed a subscriber already.
    let _ = set_global_default(reg);
}
