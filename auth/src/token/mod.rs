pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Claims;
pub use codec::SessionToken;
pub use codec::TokenCodec;
pub use errors::InvalidToken;
pub use errors::TokenError;
