//! Async Rust client library for the NinjaOne (NinjaRMM) public API.
//!
//! Provides OAuth2 client-credentials authentication with cached sessions,
//! a single authenticated dispatcher, and typed façades for the v2
//! resources: organizations, devices, locations, alerts, activities,
//! tickets, users, documents and inventory reports.
//!
//! # Modules
//!
//! - [`auth`]: OAuth2 client credentials token provider with expiry tracking.
//! - [`client`]: Authenticated HTTP dispatcher for the `/v2/` API.
//! - [`config`]: Settings from flags, environment and `env.json`.
//! - [`error`]: Typed error hierarchy (`RmmError`) for all library operations.
//! - [`wire_time`]: Epoch-seconds timestamps as the API encodes them.
//! - [`custom_fields`]: Loosely typed custom attributes with coercing accessors.
//! - [`query`]: Query-string encoding of options records.
//! - [`organizations`], [`devices`], [`locations`], [`alerts`],
//!   [`activities`], [`ticketing`], [`users`], [`documents`], [`queries`]:
//!   resource endpoints.
//!
//! # Quick Start
//!
//! ```ignore
//! use ninjarmm::auth::{Credentials, TokenProvider};
//! use ninjarmm::client::RmmClient;
//! use ninjarmm::devices::{DeviceListOptions, list_devices};
//!
//! let creds = Credentials::new("client-id", "client-secret");
//! let tp = TokenProvider::new("https://eu.ninjarmm.com", Some(creds));
//! let client = RmmClient::new(tp);
//! let opts = DeviceListOptions { filter: "offline".into(), ..Default::default() };
//! let devices = list_devices(&client, &opts).await?;
//! ```

pub mod activities;
pub mod alerts;
pub mod auth;
pub mod client;
pub mod config;
pub mod custom_fields;
pub mod devices;
pub mod documents;
pub mod error;
pub mod locations;
pub mod organizations;
pub mod queries;
pub mod query;
pub mod ticketing;
pub mod users;
pub mod wire_time;
