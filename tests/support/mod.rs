#![allow(dead_code)]

pub mod bets;
pub mod files;
