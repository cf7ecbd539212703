// ─────────────────────────────────────────────────────────────────────
// SCPN RadMap Core — Analysis Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Radiological survey analysis core.
//!
//! Batch pipeline: samples → dose field interpolation → zone
//! classification → hotspot labeling → shielding design.

pub mod classify;
pub mod clough_tocher;
pub mod compliance;
pub mod field;
pub mod hotspot;
pub mod idw;
pub mod pipeline;
pub mod scenario;
pub mod shielding;
pub mod triangulated;
