//! Command handlers for `storyweave-ctl`.
//!
//! `render` and `examples` work offline; the rest talk to a running
//! `storyweave-server` through [`crate::client::ServerClient`].

pub(crate) mod examples;
pub(crate) mod render;
pub(crate) mod server;

pub(crate) use examples::handle_examples_command;
pub(crate) use render::handle_render_command;
pub(crate) use server::{handle_edit_command, handle_generate_command, handle_health_command};
