pub mod view;

pub use view::{Orientation, ScreenView};
