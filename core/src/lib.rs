//! cmdslot core — nine per-project command slots dispatched to tmux panes or
//! detached shells.
//!
//! The crate is the slot resolution and dispatch engine: per-project
//! persistence with legacy migration ([`store`]), the slot → project → global
//! hook cascade ([`resolve`]), placeholder templating ([`template`]),
//! execution-target routing ([`route`]), and the dispatcher tying them
//! together ([`dispatch`]). Interactive surfaces and editor context are
//! external collaborators behind the [`host::Host`] trait; process execution
//! sits behind [`infrastructure`].

pub mod command;
pub mod dispatch;
pub mod engine;
pub mod errors;
pub mod host;
pub mod infrastructure;
pub mod resolve;
pub mod route;
pub mod store;
pub mod template;
pub mod types;
