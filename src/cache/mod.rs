pub mod keys;
pub mod service;

pub use keys::CacheKey;
pub use service::CacheService;
