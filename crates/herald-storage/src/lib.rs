//! Concrete secret-store backends.
//! The default shells out to the libsecret `secret-tool` helper; a
//! keyring-crate backend matches how the Herald applet reads credentials.

pub mod keyring_store;
pub mod secret_tool;
