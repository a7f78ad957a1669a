#![no_std]

pub mod proxy_amm;
pub mod proxy_controller;
