//! Reusable UI components shared by all tabs.

pub mod status_bar;
pub mod tab_bar;
