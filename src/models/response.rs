use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use std::io;

/// What a handler returns to its host: a status plus a JSON-encoded body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn new(status_code: u16, body: &ResponseBody) -> Self {
        Self {
            status_code,
            body: body.encode(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    /// Parses the body back into JSON. Mostly useful to callers and tests.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Download {
        download_url: String,
    },
    Answer {
        #[serde(rename = "Answer")]
        answer: String,
    },
    Error {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl ResponseBody {
    pub fn download(url: impl Into<String>) -> Self {
        ResponseBody::Download {
            download_url: url.into(),
        }
    }

    pub fn answer(text: impl Into<String>) -> Self {
        ResponseBody::Answer {
            answer: text.into(),
        }
    }

    pub fn error(error: impl Into<String>, details: Option<String>) -> Self {
        ResponseBody::Error {
            error: error.into(),
            details,
        }
    }

    /// Encodes with `", "` and `": "` separators, e.g. `{"Answer": "..."}`.
    pub fn encode(&self) -> String {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        if self.serialize(&mut ser).is_err() {
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
