mod api;
mod client;
mod components;
mod error;
mod idempotency;
mod model;
mod query;
mod settings;
mod view;

use components::App;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
