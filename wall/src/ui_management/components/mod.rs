mod component;
pub mod input_box;

pub use self::component::{Component, ComponentRender};
