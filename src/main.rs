#![allow(warnings)]
//! Marketplace Admin Frontend Entry Point

mod models;
mod api;
mod config;
mod context;
mod store;
mod pagination;
mod dispute;
mod password;
mod camera;
mod dialog;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
