// Service exports
pub mod cache;
pub mod catalog;
pub mod postgres;
pub mod store;
pub mod supabase;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use catalog::BreedCatalog;
pub use postgres::{PostgresClient, PostgresError};
pub use store::{AuthError, AuthProvider, AuthUser, BreedStore, QuizResultSink, StoreError};
pub use supabase::{SupabaseClient, SupabaseError, SupabaseTables};
