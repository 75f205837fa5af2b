//! Business logic services
//!
//! Services gather inputs from the stores, run the authorization router and
//! apply the resulting mutation.

pub mod team_member_service;

pub use team_member_service::TeamMemberService;
