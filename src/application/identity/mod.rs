//! Identity module: members and authentication
//!
//! `MemberService` covers login, member administration and password
//! changes. `Actor` is the authenticated caller as seen by every service.

pub mod actor;
pub mod service;

pub use actor::Actor;
pub use service::{AuthResult, CreateMember, MemberService};
