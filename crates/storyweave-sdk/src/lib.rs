//! StoryWeave renderer: turns a widget description into deployable artifacts.
//!
//! This crate is consumed by both `storyweave-server` (HTTP service) and
//! `storyweave-ctl` (CLI). It performs no I/O; all functions are pure and
//! deterministic for a given input.
//!
//! # Modules
//!
//! - [`codegen`]: React component and embed snippet emitters

pub mod codegen;

pub use codegen::{
    component_name, emit_component, emit_embed, emit_embed_with_cdn, CodegenError,
    ComponentSource, EmbedSource, DEFAULT_CDN_BASE,
};
