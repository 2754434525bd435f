mod error;
mod extractors;
mod tagged_response;
