//! Plotting for Sanger chromatographs: the four base-intensity curves with a
//! base-letter track, plus per-position overlays for highlighted bases and
//! mutation labels. The caller owns the axes and layers calls on it; nothing
//! here mutates the trace record.

use eframe::egui::{pos2, Align2, Color32};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::debug;

use crate::{
    ab1::{SeqRecordAb1, TraceChannel},
    align::SitePair,
    axes::{Axes, Element},
};

const COLOR_A: Color32 = Color32::from_rgb(0, 128, 0); // green
const COLOR_C: Color32 = Color32::from_rgb(0, 0, 255); // blue
const COLOR_G: Color32 = Color32::from_rgb(0, 0, 0); // black
const COLOR_T: Color32 = Color32::from_rgb(255, 0, 0); // red
const COLOR_OTHER: Color32 = Color32::from_rgb(128, 0, 128); // purple

const COLOR_HIGHLIGHT_PASS: Color32 = Color32::from_rgb(255, 255, 0); // yellow
const COLOR_HIGHLIGHT_FAIL: Color32 = Color32::from_rgb(128, 128, 128); // grey
const COLOR_MUT_LABEL: Color32 = Color32::from_rgb(0, 190, 190); // cyan

const TRACE_STROKE_WIDTH: f32 = 2.;
const TRACE_FILL_ALPHA: f32 = 0.125;
const HIGHLIGHT_ALPHA: f32 = 0.3;

/// Half a trace unit of padding on each side of the displayed peak range.
const X_PAD: f32 = 0.5;
/// Fallback highlight edge at the sequence boundary.
const EDGE_FALLBACK: f32 = -0.5;

const Y_BOTTOM: f32 = -0.15;
const Y_TOP: f32 = 1.05;
/// Where the base-letter track sits, below the curves.
const BASE_LETTER_Y: f32 = -0.11;
const MUT_LABEL_Y: f32 = 0.99;

const FONT_SIZE_BASE: f32 = 14.;
const FONT_SIZE_MUT_LABEL: f32 = 16.;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    /// Raised when asked to highlight a base whose peak is not in the current
    /// view; the caller must plot the chromatograph first to establish bounds.
    #[error("peak at x={peak} is outside the current plot bounds [{xmin}, {xmax})")]
    PeakOutsideView { peak: f32, xmin: f32, xmax: f32 },
}

/// Color for a called base. Total: anything outside ACGT maps to the fallback.
pub fn base_color(base: char) -> Color32 {
    match base {
        'A' => COLOR_A,
        'C' => COLOR_C,
        'G' => COLOR_G,
        'T' => COLOR_T,
        _ => COLOR_OTHER,
    }
}

/// Plot a Sanger chromatograph for a region of the record.
///
/// `region` includes both its start and end, 1-based; it defaults to the whole
/// sequence and is clamped to it. A missing record returns `axes` untouched
/// (including `None`); a missing axes gets a fresh fixed-size one. A region or
/// display window that ends up containing nothing degrades to a no-op.
pub fn plot_chromatograph(
    seq: Option<&SeqRecordAb1>,
    region: Option<(i64, i64)>,
    axes: Option<Axes>,
) -> Option<Axes> {
    let Some(seq) = seq else {
        return axes;
    };

    let len = seq.len();
    let (region_start, region_end) = match region {
        Some((start, end)) => (start.max(0) as usize, end.clamp(0, len as i64) as usize),
        None => (0, len),
    };

    let mut axes = axes.unwrap_or_default();

    if region_start >= region_end {
        debug!(region_start, region_end, "empty region; nothing to plot");
        return Some(axes);
    }

    let peaks = &seq.peak_locations;
    let xlim_left = peaks[region_start] - X_PAD;
    // One past the last included base where it exists; the final peak otherwise.
    let xlim_right = peaks[region_end.min(len - 1)] + X_PAD;

    debug!(region_start, region_end, xlim_left, xlim_right, "plotting chromatograph");

    // Subset the trace samples to the display window, keeping channels aligned
    // per sample.
    let sample_is: Vec<usize> = seq
        .trace_x
        .iter()
        .enumerate()
        .filter(|(_, &x)| xlim_left <= x && x <= xlim_right)
        .map(|(i, _)| i)
        .collect();
    if sample_is.is_empty() {
        debug!("no trace samples in the display window; nothing to plot");
        return Some(axes);
    }
    let trace_x: Vec<f32> = sample_is.iter().map(|&i| seq.trace_x[i]).collect();

    // One vertical scale for all four channels, so relative amplitudes survive.
    let trace_max = TraceChannel::iter()
        .flat_map(|ch| sample_is.iter().map(move |&i| seq.channel_data(ch)[i]))
        .max()
        .unwrap_or(0);
    let trace_max = if trace_max == 0 { 1. } else { f32::from(trace_max) };

    for channel in TraceChannel::iter() {
        let base = seq.channel_base(channel);
        let color = base_color(base);
        let data = seq.channel_data(channel);
        let trace_y: Vec<f32> = sample_is.iter().map(|&i| f32::from(data[i]) / trace_max).collect();

        axes.line(&trace_x, &trace_y, color, TRACE_STROKE_WIDTH);
        axes.fill_between(&trace_x, &trace_y, color.gamma_multiply(TRACE_FILL_ALPHA));
        axes.legend_entry(base, color);
    }

    // The base-letter track, at each included peak.
    let mut ticks = Vec::with_capacity(region_end - region_start);
    for i in region_start..region_end {
        let peak = peaks[i];
        if let Some(base) = seq.base(i) {
            axes.push(Element::Text {
                pos: pos2(peak, BASE_LETTER_Y),
                text: base.to_string(),
                color: base_color(base),
                size: FONT_SIZE_BASE,
                bold: false,
                monospace: true,
                rotation: 0.,
                anchor: Align2::LEFT_CENTER,
            });
        }
        // Ticks carry the 1-based sequence position, not the trace x-coordinate.
        ticks.push((peak, (i + 1).to_string()));
    }

    axes.set_ylim(Y_BOTTOM, Y_TOP);
    axes.set_xlim(xlim_left, xlim_right);
    axes.set_xticks(ticks);
    axes.hide_y_axis();
    axes.spines.left = false;
    axes.spines.right = false;
    axes.spines.top = false;
    axes.set_grid(false);

    Some(axes)
}

/// Highlight the area around one peak with a translucent rectangle, yellow for
/// a site that passed upstream filtering, grey otherwise.
///
/// `position` is 1-based; an out-of-range position panics, matching the
/// indexing contract of the record. Errors if the peak lies outside the axes'
/// current view, which happens when the chromatograph was not plotted first.
pub fn highlight_base(
    position: usize,
    seq: &SeqRecordAb1,
    axes: &mut Axes,
    passed_filter: bool,
) -> Result<(), PlotError> {
    let peaks = &seq.peak_locations;
    let peak = seq.peak_x(position);

    let (view_min, view_max) = axes.xlim();
    if !(view_min <= peak && peak < view_max) {
        return Err(PlotError::PeakOutsideView {
            peak,
            xmin: view_min,
            xmax: view_max,
        });
    }

    let xmin = if position == 1 {
        EDGE_FALLBACK
    } else {
        0.5 * (peaks[position - 1] + peaks[position - 2])
    };
    // The last-base fallback reuses the first-base edge constant; kept as-is for
    // compatibility with the upstream toolkit. See DESIGN.md, open question 1.
    let xmax = if position == peaks.len() {
        EDGE_FALLBACK
    } else {
        0.5 * (peaks[position - 1] + peaks[position])
    };

    let (ymin, ymax) = axes.ylim();
    let color = if passed_filter {
        COLOR_HIGHLIGHT_PASS
    } else {
        COLOR_HIGHLIGHT_FAIL
    };
    axes.rect(
        pos2(xmin, ymin),
        pos2(xmax, ymax),
        color.gamma_multiply(HIGHLIGHT_ALPHA),
    );
    Ok(())
}

/// Label a mutation at its chromatogram position with the conventional
/// shorthand (eg `G123T`), rotated so neighboring labels stay legible.
///
/// Panics if the site's `cf_pos` is out of range for the record's peak list.
pub fn annotate_mutation(mutation: &SitePair, seq: &SeqRecordAb1, axes: &mut Axes) {
    let peak = seq.peak_x(mutation.cf_pos);
    axes.push(Element::Text {
        pos: pos2(peak, MUT_LABEL_Y),
        text: mutation.to_string(),
        color: COLOR_MUT_LABEL,
        size: FONT_SIZE_MUT_LABEL,
        bold: true,
        monospace: false,
        rotation: 45.,
        anchor: Align2::CENTER_CENTER,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Four bases with peaks every 10 trace units and one dense sample per unit.
    /// Each base's own channel carries a triangular bump peaking at its call;
    /// channel 2 (A) holds the single global maximum of 800.
    fn test_record() -> SeqRecordAb1 {
        let trace_x: Vec<f32> = (0..=30).map(|i| i as f32).collect();
        let bump = |center: f32, amp: f32| -> Vec<u16> {
            trace_x
                .iter()
                .map(|&x| {
                    let d = (x - center).abs();
                    if d < 5. { (amp * (1. - d / 5.)) as u16 } else { 0 }
                })
                .collect()
        };
        SeqRecordAb1 {
            id: "test".to_owned(),
            sequence: "ACGT".to_owned(),
            peak_locations: vec![0., 10., 20., 30.],
            data_ch1: bump(20., 500.), // G
            data_ch2: bump(0., 800.),  // A
            data_ch3: bump(30., 400.), // T
            data_ch4: bump(10., 600.), // C
            trace_x,
            channels: ['G', 'A', 'T', 'C'],
            ..Default::default()
        }
    }

    fn plotted() -> Axes {
        plot_chromatograph(Some(&test_record()), None, None).unwrap()
    }

    #[test]
    fn full_region_ticks_and_limits() {
        let axes = plotted();

        let tick_xs: Vec<f32> = axes.xticks().iter().map(|(x, _)| *x).collect();
        let tick_labels: Vec<&str> = axes.xticks().iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(tick_xs, vec![0., 10., 20., 30.]);
        assert_eq!(tick_labels, vec!["1", "2", "3", "4"]);

        assert_eq!(axes.xlim(), (-0.5, 30.5));
        assert_eq!(axes.ylim(), (-0.15, 1.05));
        assert!(!axes.spines.left && !axes.spines.right && !axes.spines.top);
        assert!(axes.spines.bottom);

        // 4 curves, 4 fills, 4 base letters.
        assert_eq!(axes.elements().len(), 12);
        assert_eq!(axes.legend().len(), 4);
        let legend_labels: Vec<&str> = axes.legend().iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(legend_labels, vec!["G", "A", "T", "C"]);
    }

    #[test]
    fn absent_record_is_identity() {
        assert!(plot_chromatograph(None, None, None).is_none());

        let axes = plot_chromatograph(None, Some((1, 2)), Some(Axes::default())).unwrap();
        assert!(axes.elements().is_empty());
        assert_eq!(axes.xlim(), (0., 1.));
    }

    #[test]
    fn channels_share_one_scale() {
        let axes = plotted();

        let mut max_y = f32::MIN;
        for element in axes.elements() {
            if let Element::Line { points, .. } = element {
                for p in points {
                    max_y = max_y.max(p.y);
                }
            }
        }
        // The global maximum (800, channel 2) maps to exactly 1.0.
        assert_eq!(max_y, 1.0);

        // The other channels peak proportionally below it.
        let ch1_max = match &axes.elements()[0] {
            Element::Line { points, .. } => points.iter().map(|p| p.y).fold(f32::MIN, f32::max),
            other => panic!("unexpected element: {other:?}"),
        };
        assert!((ch1_max - 500. / 800.).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_region_clamps_to_full() {
        let rec = test_record();
        let full = plot_chromatograph(Some(&rec), None, None).unwrap();
        let clamped = plot_chromatograph(Some(&rec), Some((-5, 1000)), None).unwrap();

        assert_eq!(full.xlim(), clamped.xlim());
        assert_eq!(full.xticks(), clamped.xticks());
        assert_eq!(full.elements(), clamped.elements());
    }

    #[test]
    fn inverted_region_is_a_noop() {
        let axes = plot_chromatograph(Some(&test_record()), Some((5, 2)), None).unwrap();
        assert!(axes.elements().is_empty());
    }

    #[test]
    fn empty_record_is_a_noop() {
        let rec = SeqRecordAb1::default();
        let axes = plot_chromatograph(Some(&rec), None, None).unwrap();
        assert!(axes.elements().is_empty());
    }

    #[test]
    fn window_without_samples_is_a_noop() {
        let rec = SeqRecordAb1 {
            sequence: "AC".to_owned(),
            peak_locations: vec![100., 110.],
            trace_x: (0..10).map(|i| i as f32).collect(),
            data_ch1: vec![1; 10],
            data_ch2: vec![1; 10],
            data_ch3: vec![1; 10],
            data_ch4: vec![1; 10],
            channels: ['G', 'A', 'T', 'C'],
            ..Default::default()
        };
        let axes = plot_chromatograph(Some(&rec), None, None).unwrap();
        assert!(axes.elements().is_empty());
    }

    #[test]
    fn highlight_adds_midpoint_spanning_rect() {
        let rec = test_record();
        let mut axes = plotted();
        let before = axes.elements().len();

        highlight_base(1, &rec, &mut axes, true).unwrap();

        assert_eq!(axes.elements().len(), before + 1);
        match axes.elements().last().unwrap() {
            Element::Rect { a, b, .. } => {
                // Left edge at the boundary fallback, right edge midway to peak 2,
                // spanning the full y range.
                assert_eq!(*a, pos2(-0.5, -0.15));
                assert_eq!(*b, pos2(5., 1.05));
            }
            other => panic!("unexpected element: {other:?}"),
        }
    }

    #[test]
    fn highlight_outside_view_errors() {
        let rec = test_record();
        // Region covering only the final base; peak 1 is far left of the view.
        let mut axes = plot_chromatograph(Some(&rec), Some((3, 4)), None).unwrap();

        let err = highlight_base(1, &rec, &mut axes, true).unwrap_err();
        assert!(matches!(err, PlotError::PeakOutsideView { peak, .. } if peak == 0.));
    }

    #[test]
    fn last_base_highlight_keeps_fallback_edge() {
        let rec = test_record();
        let mut axes = plotted();

        highlight_base(4, &rec, &mut axes, false).unwrap();

        match axes.elements().last().unwrap() {
            Element::Rect { a, b, .. } => {
                assert_eq!(a.x, 25.); // midpoint of peaks 3 and 4
                assert_eq!(b.x, -0.5); // boundary fallback, reused verbatim
            }
            other => panic!("unexpected element: {other:?}"),
        }
    }

    #[test]
    #[should_panic]
    fn highlight_position_out_of_range_panics() {
        let rec = test_record();
        let mut axes = plotted();
        let _ = highlight_base(5, &rec, &mut axes, true);
    }

    #[test]
    fn mutation_label_is_rotated_and_centered_on_peak() {
        let rec = test_record();
        let mut axes = plotted();

        let site = SitePair {
            ref_pos: 123,
            ref_base: 'G',
            cf_pos: 3,
            cf_base: 'T',
            cf_qual: None,
        };
        annotate_mutation(&site, &rec, &mut axes);

        match axes.elements().last().unwrap() {
            Element::Text {
                pos,
                text,
                bold,
                rotation,
                anchor,
                ..
            } => {
                assert_eq!(*pos, pos2(20., 0.99));
                assert_eq!(text, "G123T");
                assert!(*bold);
                assert_eq!(*rotation, 45.);
                assert_eq!(*anchor, Align2::CENTER_CENTER);
            }
            other => panic!("unexpected element: {other:?}"),
        }
    }

    #[test]
    #[should_panic]
    fn mutation_position_out_of_range_panics() {
        let rec = test_record();
        let mut axes = plotted();
        let site = SitePair {
            ref_pos: 1,
            ref_base: 'A',
            cf_pos: 5,
            cf_base: 'C',
            cf_qual: None,
        };
        annotate_mutation(&site, &rec, &mut axes);
    }

    #[test]
    fn base_colors_are_total() {
        assert_eq!(base_color('A'), COLOR_A);
        assert_eq!(base_color('T'), COLOR_T);
        assert_eq!(base_color('N'), COLOR_OTHER);
        assert_eq!(base_color('x'), COLOR_OTHER);
    }
}
