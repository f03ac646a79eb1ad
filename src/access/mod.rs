//! Pure access-control core
//!
//! Role resolution and the visibility/rejudge decision tables. Everything in
//! this module is a pure function over immutable snapshots: no database, no
//! clock reads, no mutation. The service layer gathers the snapshots and the
//! current time, then asks this module for a verdict.

pub mod roles;
pub mod visibility;

pub use roles::{Role, RoleSet, roles_of};
pub use visibility::{Access, SubmissionScope, can_rejudge, can_view_detail};
