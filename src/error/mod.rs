mod generator;
mod io;
mod resolve;

pub use generator::GeneratorError;
pub use io::IoError;
pub use resolve::ResolveError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

pub type Result<T> = std::result::Result<T, Error>;
