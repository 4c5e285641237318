//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in ondeck-core for the gate hardware:
//!
//! - 7-segment displays (HT16K33 4-digit backpack)

#![no_std]
#![deny(unsafe_code)]

pub mod segment;
