#[path = "../common/mod.rs"]
mod common;

mod framing;
mod header_exclusivity;
mod round_trip;
mod tar_zstd;
mod validation;
