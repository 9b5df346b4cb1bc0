//! Pages of the demo app.

pub mod home;
