//! Presentation layer: one module per page plus the shared panels.

pub mod dashboard;
pub mod home;
pub mod map;
pub mod panels;
