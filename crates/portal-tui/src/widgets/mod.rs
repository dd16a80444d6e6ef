pub mod signal_bars;
