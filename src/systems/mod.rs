pub mod colors;
pub mod interaction;
pub mod ui;
