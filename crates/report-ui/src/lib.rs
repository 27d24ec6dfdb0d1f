//! Text and JSON rendering of the subscription report, plus the interactive
//! menu that chooses between reports.

pub mod app;
pub mod growth_view;
pub mod revenue_view;
pub mod subscriber_view;
