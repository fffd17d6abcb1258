//! Board-agnostic bring-up core for ath79 routers
//!
//! This crate contains everything about board bring-up that does not
//! depend on a particular board:
//!
//! - Board descriptor data model (LEDs, buttons, SPI devices, ART layout)
//! - Calibration store for factory MAC addresses and radio caldata
//! - Boot state machine and the single-shot init sequencer
//! - Device registry interface and the machine table
//!
//! A board crate supplies a `static` [`config::BoardDescriptor`] and hands
//! it, together with the mapped calibration region, to
//! [`boot::InitSequencer`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod boot;
pub mod calibration;
pub mod config;
pub mod registry;
