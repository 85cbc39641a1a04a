#![deny(unused_must_use, missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate handlebars;
#[cfg(test)]
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate redacted_debug;

/// Signing up a new administrator.
pub mod admin;

/// The generic searchable, paginated and exportable list behind the users and equipment screens.
pub mod catalog;

/// A client to the inventory REST service, as well as the `InventoryApi` trait that the form
/// machinery talks to instead of the network directly.
pub mod client;

/// Details pertaining to parsing the configuration file.
pub mod config;

/// Registering components: monitors, mice, keyboards and IP phones.
pub mod components;

/// The context object handed to every screen. Bundles the api, the notifier and the lifetime flag
/// that lets a screen discard fetches which resolve after it has been closed.
pub mod ctx;

/// Some helpers associated with driving the clis that ship with inventario.
pub mod cli;

/// The assignment editor. This is the create/update screen for an assignment, gluing together
/// the reference data, the record loader, the form state and submission.
pub mod editor;

/// The equipment screens, plus registering security equipment.
pub mod equipment;

/// The mutable state of an assignment being edited: scalar fields plus the component and external
/// device rows.
pub mod form;

/// A module concerning itself with presenting information in a human readable format.
pub mod formatting;

/// The assignment list screen and its filtered views: search, pagination, deletion, csv export
/// and a plaintext rendering.
pub mod listing;

/// Fetches an existing assignment and converts it into form state.
pub mod loader;

/// Message types used on the wire between the panel and the inventory service.
pub mod messages;

/// Contains the `Notify` trait, through which every user facing notice is delivered.
pub mod notify;

/// The lookup collections needed to populate the selection controls of the assignment form.
pub mod reference;

/// The persistent key/value storage holding the access token and display name, and the `Session`
/// that is read out of it.
pub mod session;

/// Turning form state into the wire payload.
pub mod submit;

/// The users screens.
pub mod users;

mod version;

/// What version of inventario do you have :)
pub use crate::version::VERSION;

/// Who wrote this mess
pub use crate::version::AUTHOR;

#[cfg(test)]
/// Helpers for use in tests
mod test_helpers;
