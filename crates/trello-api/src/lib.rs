//! HTTP implementations of the pipeline's collaborators.

pub mod client;
pub mod title_fetcher;

pub use client::HttpTrelloApi;
pub use title_fetcher::HtmlTitleFetcher;
