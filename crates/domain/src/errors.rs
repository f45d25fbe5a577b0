use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed record payload: {message}")]
    MalformedPayload { message: String },
}
