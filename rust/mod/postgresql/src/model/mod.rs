pub mod role;

pub use role::{RoleEntry, RoleName, WriteRole};
