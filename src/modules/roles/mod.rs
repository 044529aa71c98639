//! Credential Record administration for roles holding `ManageRoles`.

pub mod controller;
pub mod router;
pub mod service;
