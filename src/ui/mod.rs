pub mod components;
pub mod plain;
pub mod screens;
pub mod theme;

pub use theme::Theme;
