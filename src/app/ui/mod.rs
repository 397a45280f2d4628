mod accounts;
mod details;
mod input;
mod panels;

pub(in crate::app) use input::draw_address_bar;
pub(in crate::app) use panels::{draw_empty_state, draw_error, draw_instructions, draw_loading};
