//! Member aggregate
//!
//! Contains the Member entity, DTOs, and repository interface.

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{MemberFilter, NewMember};
pub use model::{Member, MemberRole};
pub use repository::MemberRepository;
