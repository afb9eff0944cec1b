//! Attendance endpoints nested under `/seminars/{seminar_id}/attendance`.
//!
//! ## Structure
//! - `post.rs` — QR issuance (admin) and scan recording (authenticated)
//! - `get.rs` — QR PNG download and the present-participant list (admin)

pub mod get;
pub mod post;
