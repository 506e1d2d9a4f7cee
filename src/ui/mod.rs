//! Dioxus views: the shared shell, the routed pages and their components.

pub mod components;
pub mod pages;
pub mod shell;
pub mod theme;
