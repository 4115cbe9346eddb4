pub mod flex;
pub mod rating_bar;
