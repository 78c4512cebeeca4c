//! Synthetic field sensor series, an irrigation-need regression pipeline and
//! the service that serves it.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
