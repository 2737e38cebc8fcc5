pub mod cli_args;
pub mod error;
mod extractor;
mod middleware;
pub mod registry;
mod route;
pub mod server;
mod state;

#[cfg(test)]
mod test;
