pub mod quote;
pub mod resolver;
pub mod source;
pub mod sources;

pub use quote::{RawQuote, ResolvedQuote};
pub use resolver::TokenResolver;
pub use source::TokenDataSource;
