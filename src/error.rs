use std::io;
use std::net::SocketAddr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no author with id {0}")]
    UnknownAuthor(i32),

    #[error("failed to listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server terminated: {0}")]
    Serve(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
