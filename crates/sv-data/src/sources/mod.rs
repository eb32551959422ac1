pub mod csv_dir;
pub mod demo;

pub use csv_dir::{load_csv_dir, load_csv_slice};
pub use demo::{demo_stack, DemoStackParams};
