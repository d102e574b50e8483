pub mod bucket;
pub mod issue;
