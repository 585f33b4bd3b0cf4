mod actions;
mod app;
mod banners;
mod confirm_modal;
mod dialogs;
mod known_words;
mod message_overlay;
mod pagination_bar;
mod review_table;
pub mod theme;
mod top_bar;

pub use app::ReviewApp;
