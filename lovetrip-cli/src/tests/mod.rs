//! Shared test harness modules for the LoveTrip CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Tests index fixture places and routes whose length they control"
)]

use super::*;

mod helpers;
