#![forbid(unsafe_code)]

//! Core: geometry shared by the viewport engine and its hosts.
//!
//! # Role in tileview
//! `tileview-core` owns the pixel rectangle and margin types. The layout
//! engine (`tileview-layout`) consumes them, and renderers or hit-testers
//! read them back out of the produced viewport records.
//!
//! All rectangles use the rendering surface's convention: origin at the
//! bottom-left, `y` increasing upward.

pub mod geometry;
