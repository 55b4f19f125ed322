pub mod applier;
pub mod browser;
pub mod catalog;
pub mod controller;
pub mod dom;
pub mod scheduler;
pub mod selector;
pub mod wasm;

pub use applier::*;
pub use browser::*;
pub use catalog::*;
pub use controller::*;
pub use dom::*;
pub use scheduler::*;
pub use selector::*;
pub use wasm::*;

#[cfg(test)]
mod tests;
