mod panels;
mod screens;

pub(super) use screens::{error_screen, loading_screen, query_screen};
