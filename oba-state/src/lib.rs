//! State orchestration for the OBahia irrigation dashboard.
//!
//! All UI state lives in one [`Dashboard`] store. Components call its methods
//! and render from [`Dashboard::read`]; map changes leave the store as
//! [`MapCommand`]s handed to the subscribed listener.

pub mod chart;
pub mod command;
pub mod error;
pub mod layers;
pub mod menu;
pub mod popup;
pub mod sequence;
pub mod store;
pub mod view;

pub use command::MapCommand;
pub use error::DashboardError;
pub use store::{Dashboard, DashboardModel, Outcome, Update};
