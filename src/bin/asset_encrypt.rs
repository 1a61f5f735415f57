//! Asset encryption tool - replaces a prepared `www/` folder with an
//! encrypted, optionally chunked bundle.
//!
//! Exit code 0 on success, 1 on any failure.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = hybrid_asset_bundler::cli::run_encrypt().await;
    process::exit(exit_code);
}
