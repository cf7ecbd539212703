//! Geometric primitives for SCPN RadMap Core.

pub mod delaunay;
