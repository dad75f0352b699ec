mod compare;
mod composite;
mod diff;
mod grid;
mod init;

pub use self::compare::compare;
pub use self::composite::composite;
pub use self::diff::diff;
pub use self::grid::grid;
pub use self::init::init;
