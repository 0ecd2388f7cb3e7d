pub mod bond;
pub mod scenario;
