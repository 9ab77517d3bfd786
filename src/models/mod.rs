//! Data models for Shopslot

pub mod availability;
pub mod booking;
pub mod clock;
pub mod schedule;
pub mod shop;
pub mod user;

