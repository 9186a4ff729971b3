//! Shopkeep core: the day cycle, floor layout, settlement and
//! difficulty progression of a shop-defense game, without a renderer.
//!
//! The host owns the frame loop. It calls [`engine::ShopEngine::update`]
//! once per frame with the real time elapsed, forwards player input as
//! [`command::PlayerCommand`]s, and materializes whatever the layout
//! and events ask for.

pub mod clock;
pub mod command;
pub mod config;
pub mod customers;
pub mod day_cycle;
pub mod engine;
pub mod error;
pub mod event;
pub mod layout;
pub mod ledger;
pub mod placement;
pub mod progression;
pub mod rng;
pub mod shop;
pub mod snapshot;
pub mod store;
pub mod types;
