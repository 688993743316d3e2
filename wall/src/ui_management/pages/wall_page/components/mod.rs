pub mod board;
pub mod message_input;
pub mod share_bar;
