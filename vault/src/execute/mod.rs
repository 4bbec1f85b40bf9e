//! Execute handlers for the asset bridge vault.
//!
//! This module contains all execute message handlers, organized by category:
//! - `outgoing` - SendNative and SendAsset, plus the custody pull reply
//! - `incoming` - ReceiveNative and ReceiveAsset, plus the deployment reply
//! - `admin` - Peers, message layer, non-custodial asset, pause, admin transfer

mod admin;
mod incoming;
mod outgoing;

pub use admin::*;
pub use incoming::*;
pub use outgoing::*;
