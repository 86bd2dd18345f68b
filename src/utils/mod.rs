pub mod logging;
pub mod money;

pub use money::{format_usd, format_zar, round_half_up};
