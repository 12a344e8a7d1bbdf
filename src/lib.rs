//! Visualization for Sanger-sequencing chromatograms: per-base fluorescence
//! trace curves, with positional overlays for highlighted bases and mutation
//! labels.
//!
//! The wider toolkit handles reading trace files and aligning chromatograms;
//! this crate only turns their output into a plot. A caller builds an [`Axes`]
//! via [`plot_chromatograph`], layers zero or more overlay calls on it, then
//! renders it into an egui UI.

pub mod ab1;
pub mod align;
pub mod axes;
pub mod chromatograph;

pub use crate::{
    ab1::{SeqRecordAb1, TraceChannel},
    align::SitePair,
    axes::{Axes, Element},
    chromatograph::{annotate_mutation, base_color, highlight_base, plot_chromatograph, PlotError},
};
