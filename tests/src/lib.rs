#![cfg(all(test, not(target_arch = "wasm32")))]

mod common;

mod money_market_tests;
