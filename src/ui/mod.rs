//! Physical user interface - the six grip buttons.

pub mod buttons;
