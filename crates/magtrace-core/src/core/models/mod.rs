pub mod record;
pub mod series;
