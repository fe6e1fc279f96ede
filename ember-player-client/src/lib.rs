use snafu::prelude::*;

pub mod catalog_models;
pub mod client;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Snafu, Debug)]
pub enum Error {
    #[snafu(display(
        "Catalog API key is missing. Set it with --api-key or the EMBER_API_KEY environment variable"
    ))]
    MissingApiKey,
    #[snafu(display("Invalid catalog url {url}: {message}"))]
    InvalidUrl { url: String, message: String },
    #[snafu(display("Catalog api error: {message}"))]
    Api { message: String },
    #[snafu(display("Unable to parse catalog response: {message}"))]
    DeserializeJSON { message: String },
    #[snafu(display("Catalog request failed: {source}"))]
    Request { source: reqwest::Error },
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Request { source }
    }
}
