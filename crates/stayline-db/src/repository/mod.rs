//! # Repository Implementations
//!
//! One repository per aggregate, each holding a cheap clone of the
//! connection pool:
//!
//! - [`hotel`] - Tenant scope rows
//! - [`room`] - Room types and physical room units (incl. status bulk updates)
//! - [`reservation`] - Stays, overlap queries, transactional unit assignment
//! - [`expense`] - Cost records feeding the KPI distribution deduction

pub mod expense;
pub mod hotel;
pub mod reservation;
pub mod room;
