//! Promptgauge server library (gateway router and handlers).

pub mod gateway;
