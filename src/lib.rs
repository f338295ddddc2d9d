pub mod app;
pub mod autocomplete;
pub mod catalog;
pub mod config;
pub mod countdown;
pub mod hints;
pub mod i18n;
pub mod modal;
pub mod normalize;
pub mod quiz;
pub mod share;
pub mod state;
pub mod stats;
pub mod store;
pub mod video;
