mod membership;
mod server;
mod user;
