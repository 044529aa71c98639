//! # Tavern CLI
//!
//! Role administration for bootstrapping a Tavern deployment: the first
//! `ManageRoles` role has to exist before the dashboard can manage the rest.
//!
//! ```ignore
//! use tavern_cli::roles::create_role;
//!
//! let record = create_role(store.as_ref(), verifier.as_ref(), "admin", "secret", perms).await?;
//! ```

pub mod roles;
