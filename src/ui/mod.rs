pub mod popup;

pub use popup::{
    ActiveWindow, AddressState, InfoWindowContent, InfoWindowExclusivity, InfoWindowStyle,
    WindowTransition,
};
