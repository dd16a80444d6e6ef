//! Screen components. The networks screen always fills the body; the connect
//! dialog is layered over it while open.

pub mod connect_dialog;
pub mod networks;
