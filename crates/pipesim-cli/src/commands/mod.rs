pub mod chat;
pub mod chunk;
pub mod embed;
pub mod nearest;
pub mod ocr;
pub mod predict;
pub mod quantize;
pub mod route;
pub mod search;
pub mod tokenize;

/// How a command prints its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}
