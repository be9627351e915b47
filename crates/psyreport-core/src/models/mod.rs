pub mod extraction;
pub mod record;
pub mod synthesis;
pub mod token_count;
