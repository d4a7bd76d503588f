//! Pure indicator math for the quadgate decision engine.
//!
//! All functions are deterministic functions of their input series: no
//! state, no I/O, no wall-clock reads. Insufficient lookback yields
//! `None`, never a fabricated or NaN value.

pub mod atr;
pub mod ma;
pub mod macd;
pub mod rsi;
pub mod snapshot;

pub use atr::{atr, true_range};
pub use ma::{deviation_pct, sma, trailing_ratio};
pub use macd::{ema, macd, MacdOutput};
pub use rsi::rsi;
pub use snapshot::{IndicatorSnapshot, VOLUME_WINDOW, WILDER_PERIOD};
