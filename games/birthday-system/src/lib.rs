use wasm_bindgen::prelude::*;

mod bootstrap;
mod config;
mod content;
mod factories;
mod game;
mod interaction;
mod intro;
mod sampling;
use game::BirthdaySystem;

nova_web::export_game!(BirthdaySystem, "birthday-system");
