pub mod error;
pub mod har;
pub mod listing;
pub mod parse;
pub mod pipeline;
pub mod response;
pub mod table;
pub mod typename;
pub mod types;

pub use error::{HarError, NoPriceError};
pub use har::HarReader;
pub use listing::Listing;
pub use pipeline::{
    aggregate_listings, extract_from_har, extract_from_response_body, into_records, PipelineOptions,
};
pub use response::{ResponseEnvelope, StaysMapSearchResponse, StaysSearchResponse};
pub use table::{write_csv, CSV_HEADER};
pub use typename::Typename;
