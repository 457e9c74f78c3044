mod check;
mod generate;

pub use check::check;
pub use generate::generate;
