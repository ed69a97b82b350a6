pub mod image;
pub mod request;
pub mod response;
pub mod text;

pub use self::image::*;
pub use self::request::*;
pub use self::response::*;
pub use self::text::*;
