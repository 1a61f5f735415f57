//! Asset checksum tool - fingerprints prepared platform `www/` folders.
//!
//! Writes each folder's `filelist` manifest and generated `checksum.js` script.
//! Exit code 0 on success, -2 when the checksum script folder is missing, -1
//! on any other failure.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = hybrid_asset_bundler::cli::run_checksum().await;
    process::exit(exit_code);
}
