//! Interactive 2D positioning engine.
//!
//! This crate owns the positions of on-canvas items (text boxes, images,
//! shapes) and the gestures that change them: drag, resize from one of eight
//! handles, and rotate around a center point. Every change is clamped by the
//! engine-wide constraints, recorded in a bounded undo/redo log, and published
//! to the host UI through a synchronous event dispatcher. The host is
//! responsible only for translating pointer events into engine calls and for
//! drawing items where the engine says they are.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::PositioningEngine`] and its public operations |
//! | [`item`] | Item types and the id-indexed [`item::ItemStore`] |
//! | [`geometry`] | Points, positions, resize handles, and pure geometry calculators |
//! | [`constraints`] | Engine-wide constraints and the constraint resolver |
//! | [`interaction`] | Selection, hover, and the drag/resize/rotate gesture state |
//! | [`history`] | Bounded undo/redo log of positioning actions |
//! | [`events`] | Typed events and the synchronous dispatcher |
//! | [`transform`] | Presentation helpers converting positions to transforms |
//! | [`scene`] | JSON scene and step script for replaying interactions |
//! | [`error`] | Configuration and item errors |
//! | [`consts`] | Shared defaults (minimum sizes, history size, canvas) |

pub mod consts;
pub mod constraints;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod item;
pub mod scene;
pub mod transform;
