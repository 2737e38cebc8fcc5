use std::net::SocketAddr;

use clap::Parser;

use crate::error::ErrorVerbosity;

#[derive(Parser)]
#[command(author, about, version)]
pub struct CliArgs {
    /// Socket address the server binds to.
    #[clap(long, env = "LISTEN_ADDRESS", default_value = "127.0.0.1:3001")]
    pub listen_address: SocketAddr,

    /// How much detail error responses carry.
    #[clap(long, env = "ERROR_VERBOSITY", value_enum, default_value = "message")]
    pub error_verbosity: ErrorVerbosity,
}
